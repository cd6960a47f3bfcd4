use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that abort a whole export or import pass.
///
/// Failures that only concern a single MP3 file never surface here; they are
/// folded into a [`FileOutcome`](crate::model::FileOutcome) instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when the CSV file cannot be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Errors bubbled up from the ID3 tag reader and writer.
    #[error("ID3 error: {0}")]
    Id3(#[from] id3::Error),

    /// Raised when the JSON report cannot be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raised when the folder holding the MP3 files does not exist.
    #[error("folder not found: {0}")]
    MissingFolder(PathBuf),

    /// Raised when the user provides a CSV path that does not exist.
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the CSV header lacks a mandatory column.
    #[error("CSV header is missing the '{0}' column")]
    MissingColumn(String),

    /// Raised when a file name cannot be represented in a UTF-8 CSV.
    #[error("file name is not valid UTF-8: {0}")]
    NonUtf8FileName(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
