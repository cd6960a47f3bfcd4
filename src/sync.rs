use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ToolError};
use crate::io::csv_read::{CsvImport, CsvRow};
use crate::io::csv_write::CsvExport;
use crate::io::scan::list_mp3_files;
use crate::io::tags;
use crate::model::{Command, CsvSchema, FileOutcome, Report, TagField, TagRecord};

/// Exports the tags of every MP3 file in `folder` into a CSV file.
///
/// One row is written per file, in directory enumeration order. A file whose
/// tags cannot be read still gets a row, with every tag column empty.
pub fn export(folder: &Path, output: &Path) -> Result<Report> {
    export_with(folder, output, |_| {})
}

/// Like [`export`], additionally handing each outcome to `on_outcome` as soon
/// as the file has been processed.
#[instrument(
    level = "info",
    skip_all,
    fields(folder = %folder.display(), csv = %output.display())
)]
pub fn export_with<F>(folder: &Path, output: &Path, mut on_outcome: F) -> Result<Report>
where
    F: FnMut(&FileOutcome),
{
    let filenames = list_mp3_files(folder)?;
    info!(file_count = filenames.len(), "exporting tags");

    let mut csv = CsvExport::create(output, CsvSchema::Full)?;
    let mut report = Report::new(Command::Export);

    for filename in filenames {
        let path = folder.join(&filename);
        let outcome = match tags::read_record(&path, &filename) {
            Ok(record) => {
                csv.write_record(&record)?;
                FileOutcome::Exported { filename }
            }
            Err(error) => {
                warn!(%filename, %error, "could not read tags");
                csv.write_record(&TagRecord::new(filename.as_str()))?;
                FileOutcome::ReadFailed {
                    filename,
                    reason: error.to_string(),
                }
            }
        };
        on_outcome(&outcome);
        report.push(outcome);
    }

    let rows = csv.finish()?;
    debug!(rows, "CSV written");
    Ok(report)
}

/// Updates the MP3 files in `folder` from the rows of a CSV file.
///
/// Rows are applied in file order, so a file listed twice ends up with the
/// values of its last row. Empty cells clear the corresponding tag.
pub fn import(folder: &Path, input: &Path) -> Result<Report> {
    import_with(folder, input, |_| {})
}

/// Like [`import`], additionally handing each outcome to `on_outcome` as soon
/// as the row has been applied.
#[instrument(
    level = "info",
    skip_all,
    fields(folder = %folder.display(), csv = %input.display())
)]
pub fn import_with<F>(folder: &Path, input: &Path, mut on_outcome: F) -> Result<Report>
where
    F: FnMut(&FileOutcome),
{
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(ToolError::MissingFolder(folder.to_path_buf()));
    }

    let csv = CsvImport::open(input)?;
    let fields = csv.fields();
    info!(schema = ?csv.schema(), "importing tags");

    let mut report = Report::new(Command::Import);
    for row in csv {
        let outcome = match row? {
            CsvRow::Record(record) => import_record(folder, &record, fields),
            CsvRow::Malformed {
                filename,
                line,
                reason,
            } => malformed_outcome(folder, filename, line, reason),
        };
        on_outcome(&outcome);
        report.push(outcome);
    }

    info!(
        updated = report.succeeded(),
        failed = report.failed(),
        "import finished"
    );
    Ok(report)
}

fn import_record(folder: &Path, record: &TagRecord, fields: &[TagField]) -> FileOutcome {
    let filename = record.filename.clone();
    let path = folder.join(&filename);
    if !path.exists() {
        warn!(%filename, "file not found");
        return FileOutcome::NotFound { filename };
    }

    match tags::write_record(&path, record, fields) {
        Ok(()) => {
            debug!(%filename, "tags updated");
            FileOutcome::Updated { filename }
        }
        Err(error) => {
            warn!(%filename, %error, "failed to update tags");
            FileOutcome::UpdateFailed {
                filename,
                reason: error.to_string(),
            }
        }
    }
}

fn malformed_outcome(
    folder: &Path,
    filename: Option<String>,
    line: u64,
    reason: String,
) -> FileOutcome {
    warn!(line, %reason, "malformed CSV row");
    match filename {
        Some(filename) if !folder.join(&filename).exists() => FileOutcome::NotFound { filename },
        Some(filename) => FileOutcome::UpdateFailed { filename, reason },
        None => FileOutcome::UpdateFailed {
            filename: format!("row {line}"),
            reason,
        },
    }
}
