//! ID3v2 access for the fields exchanged through the CSV file.

use std::path::{Path, PathBuf};

use id3::{Tag, TagLike, Version};

use crate::error::Result;
use crate::model::{TagField, TagRecord};

/// An MP3 file's ID3v2 tag, opened for reading or updating.
///
/// Opening fails when the file carries no ID3v2 tag or cannot be read.
#[derive(Debug)]
pub struct TagFile {
    path: PathBuf,
    tag: Tag,
}

impl TagFile {
    pub fn open(path: &Path) -> Result<Self> {
        let tag = Tag::read_from_path(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            tag,
        })
    }

    /// First value of the field's text frame, if present.
    ///
    /// ID3v2.4 stores multiple values NUL-separated; only the first one is
    /// exchanged. The track number is returned verbatim, so `3/12` survives.
    pub fn get(&self, field: TagField) -> Option<String> {
        let text = self.tag.get(field.frame_id())?.content().text()?;
        text.split('\0').next().map(str::to_owned)
    }

    /// Replaces the field's text frame. An empty value removes the frame.
    pub fn set(&mut self, field: TagField, value: &str) {
        if value.is_empty() {
            self.tag.remove(field.frame_id());
        } else {
            self.tag.set_text(field.frame_id(), value);
        }
    }

    /// Writes the tag back into the file in place.
    pub fn save(&self) -> Result<()> {
        self.tag.write_to_path(&self.path, Version::Id3v24)?;
        Ok(())
    }

    pub fn to_record(&self, filename: &str) -> TagRecord {
        let mut record = TagRecord::new(filename);
        for field in TagField::ALL {
            if let Some(value) = self.get(field) {
                record.set(field, value);
            }
        }
        record
    }
}

/// Reads the recognised fields of the file at `path`.
pub fn read_record(path: &Path, filename: &str) -> Result<TagRecord> {
    Ok(TagFile::open(path)?.to_record(filename))
}

/// Applies `fields` from `record` to the file at `path` and saves it.
///
/// Fields not listed are left untouched on the file.
pub fn write_record(path: &Path, record: &TagRecord, fields: &[TagField]) -> Result<()> {
    let mut file = TagFile::open(path)?;
    for field in fields {
        file.set(*field, record.get(*field));
    }
    file.save()
}
