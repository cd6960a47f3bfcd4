use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Name of the CSV column holding the file name relative to the folder.
pub const FILENAME_COLUMN: &str = "filename";

/// Tag fields that are exchanged through the CSV file.
///
/// The declaration order is the column order of the full CSV schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagField {
    TrackNumber,
    Title,
    Artist,
    AlbumArtist,
    Album,
}

impl TagField {
    /// All recognised fields, in CSV column order.
    pub const ALL: [TagField; 5] = [
        TagField::TrackNumber,
        TagField::Title,
        TagField::Artist,
        TagField::AlbumArtist,
        TagField::Album,
    ];

    /// Header name of the CSV column carrying this field.
    pub fn column(self) -> &'static str {
        match self {
            TagField::TrackNumber => "tracknumber",
            TagField::Title => "title",
            TagField::Artist => "artist",
            TagField::AlbumArtist => "albumartist",
            TagField::Album => "album",
        }
    }

    /// ID3v2 text frame backing this field.
    pub fn frame_id(self) -> &'static str {
        match self {
            TagField::TrackNumber => "TRCK",
            TagField::Title => "TIT2",
            TagField::Artist => "TPE1",
            TagField::AlbumArtist => "TPE2",
            TagField::Album => "TALB",
        }
    }

    /// Resolves a CSV header name. Matching is exact, as the header is written
    /// by [`CsvSchema::header`].
    pub fn from_column(name: &str) -> Option<TagField> {
        TagField::ALL
            .into_iter()
            .find(|field| field.column() == name)
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Column layouts of the CSV interchange file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvSchema {
    /// `filename,tracknumber,title,artist,albumartist,album`
    Full,
    /// `filename,title,artist,album`, written by earlier releases.
    Legacy,
}

impl CsvSchema {
    /// Tag fields carried by the schema, in column order.
    pub fn fields(self) -> &'static [TagField] {
        match self {
            CsvSchema::Full => &TagField::ALL,
            CsvSchema::Legacy => &[TagField::Title, TagField::Artist, TagField::Album],
        }
    }

    /// Header row, starting with the file name column.
    pub fn header(self) -> Vec<&'static str> {
        std::iter::once(FILENAME_COLUMN)
            .chain(self.fields().iter().map(|field| field.column()))
            .collect()
    }
}

/// Metadata snapshot of one MP3 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// File name relative to the working folder.
    pub filename: String,
    values: BTreeMap<TagField, String>,
}

impl TagRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            values: BTreeMap::new(),
        }
    }

    /// Value of a field; absent fields read as the empty string.
    pub fn get(&self, field: TagField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: TagField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Builder-style variant of [`TagRecord::set`].
    pub fn with(mut self, field: TagField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Serialises the record as a CSV row laid out after `schema`.
    pub fn to_row(&self, schema: CsvSchema) -> Vec<&str> {
        std::iter::once(self.filename.as_str())
            .chain(schema.fields().iter().map(|field| self.get(*field)))
            .collect()
    }
}

/// Which pass produced a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Export,
    Import,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Export => write!(f, "export"),
            Command::Import => write!(f, "import"),
        }
    }
}

/// Result of processing a single file during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Tags were read and written to the CSV.
    Exported { filename: String },
    /// Tags could not be read; an empty row was written instead.
    ReadFailed { filename: String, reason: String },
    /// Tags from the CSV row were saved to the file.
    Updated { filename: String },
    /// The CSV row references a file that does not exist.
    NotFound { filename: String },
    /// The file exists but could not be updated.
    UpdateFailed { filename: String, reason: String },
}

impl FileOutcome {
    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Exported { filename }
            | FileOutcome::ReadFailed { filename, .. }
            | FileOutcome::Updated { filename }
            | FileOutcome::NotFound { filename }
            | FileOutcome::UpdateFailed { filename, .. } => filename,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FileOutcome::ReadFailed { .. }
                | FileOutcome::NotFound { .. }
                | FileOutcome::UpdateFailed { .. }
        )
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::Exported { filename } => write!(f, "✅ Exported: {filename}"),
            FileOutcome::ReadFailed { filename, reason } => {
                write!(f, "⚠️ Could not read {filename}: {reason}")
            }
            FileOutcome::Updated { filename } => write!(f, "✅ Updated: {filename}"),
            FileOutcome::NotFound { filename } => write!(f, "❌ File not found: {filename}"),
            FileOutcome::UpdateFailed { filename, reason } => {
                write!(f, "⚠️ Failed to update {filename}: {reason}")
            }
        }
    }
}

/// Per-file outcomes of one export or import pass, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub command: Command,
    pub outcomes: Vec<FileOutcome>,
}

impl Report {
    pub fn new(command: Command) -> Self {
        Self {
            command,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.len() - self.failed()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_failure())
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(FileOutcome::is_failure)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} succeeded, {} failed",
            self.command,
            self.succeeded(),
            self.failed()
        )
    }
}
