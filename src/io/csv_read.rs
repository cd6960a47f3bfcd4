use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use tracing::{debug, warn};

use crate::error::{Result, ToolError};
use crate::model::{CsvSchema, FILENAME_COLUMN, TagField, TagRecord};

const BOM: char = '\u{feff}';

/// A row read from the import CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvRow {
    /// A complete row carrying every tag column found in the header.
    Record(TagRecord),
    /// A row that does not fit the header.
    Malformed {
        filename: Option<String>,
        line: u64,
        reason: String,
    },
}

/// Header-keyed reader over the import CSV.
///
/// Columns are located by header name, so their order is irrelevant. The
/// header must carry every column of either the full or the legacy schema;
/// other columns are ignored.
pub struct CsvImport {
    records: StringRecordsIntoIter<File>,
    schema: CsvSchema,
    filename_index: usize,
    columns: Vec<(TagField, usize)>,
}

impl CsvImport {
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;
        let headers = reader.headers()?.clone();
        let (schema, filename_index, columns) = resolve_columns(&headers)?;
        debug!(?schema, "resolved CSV header");

        Ok(Self {
            records: reader.into_records(),
            schema,
            filename_index,
            columns,
        })
    }

    pub fn schema(&self) -> CsvSchema {
        self.schema
    }

    /// Tag fields carried by the file, in schema order.
    pub fn fields(&self) -> &'static [TagField] {
        self.schema.fields()
    }

    fn to_row(&self, record: &StringRecord) -> CsvRow {
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        let filename = record.get(self.filename_index);

        let mut missing = Vec::new();
        if filename.is_none() {
            missing.push(FILENAME_COLUMN);
        }
        missing.extend(
            self.columns
                .iter()
                .filter(|(_, index)| record.get(*index).is_none())
                .map(|(field, _)| field.column()),
        );

        match filename {
            Some(filename) if missing.is_empty() => {
                let mut tag_record = TagRecord::new(filename);
                for (field, index) in &self.columns {
                    tag_record.set(*field, &record[*index]);
                }
                CsvRow::Record(tag_record)
            }
            _ => CsvRow::Malformed {
                filename: filename.map(str::to_owned),
                line,
                reason: format!("row is missing column(s): {}", missing.join(", ")),
            },
        }
    }
}

impl Iterator for CsvImport {
    type Item = Result<CsvRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.records.next()? {
            Ok(record) => Ok(self.to_row(&record)),
            Err(error) if error.is_io_error() => Err(ToolError::from(error)),
            Err(error) => Ok(CsvRow::Malformed {
                filename: None,
                line: error.position().map(|pos| pos.line()).unwrap_or_default(),
                reason: error.to_string(),
            }),
        };
        Some(item)
    }
}

fn resolve_columns(
    headers: &StringRecord,
) -> Result<(CsvSchema, usize, Vec<(TagField, usize)>)> {
    let names: Vec<&str> = headers
        .iter()
        .map(|name| name.trim_start_matches(BOM))
        .collect();
    let position = |column: &str| names.iter().position(|name| *name == column);

    let filename_index = position(FILENAME_COLUMN)
        .ok_or_else(|| ToolError::MissingColumn(FILENAME_COLUMN.to_string()))?;
    let schema = detect_schema(&names)?;
    let columns = schema
        .fields()
        .iter()
        .filter_map(|field| position(field.column()).map(|index| (*field, index)))
        .collect();

    for name in &names {
        if *name != FILENAME_COLUMN && TagField::from_column(name).is_none() {
            warn!(column = %name, "ignoring unknown CSV column");
        }
    }
    Ok((schema, filename_index, columns))
}

/// Picks the full schema when all of its columns are present, or the legacy
/// one when its columns are present and no full-only column is. Anything else
/// is rejected, naming the first full-schema column that is missing.
fn detect_schema(names: &[&str]) -> Result<CsvSchema> {
    let has = |field: &TagField| names.contains(&field.column());
    let full = CsvSchema::Full.fields();
    let legacy = CsvSchema::Legacy.fields();

    if full.iter().all(has) {
        return Ok(CsvSchema::Full);
    }
    let full_only_present = full
        .iter()
        .filter(|field| !legacy.contains(*field))
        .any(has);
    if legacy.iter().all(has) && !full_only_present {
        return Ok(CsvSchema::Legacy);
    }

    let missing = full
        .iter()
        .find(|field| !has(*field))
        .map(|field| field.column())
        .unwrap_or_default();
    Err(ToolError::MissingColumn(missing.to_string()))
}
