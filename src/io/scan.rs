use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ToolError};

const MP3_SUFFIX: &str = ".mp3";

/// Lists the MP3 files directly inside `folder`, in directory enumeration
/// order.
///
/// Entries whose lowercased name ends in `.mp3` are returned unless they are
/// directories, which are never descended into. Dangling symlinks are kept so
/// that the caller reports them as unreadable. Names that are not valid UTF-8
/// are skipped because they cannot be written to the CSV.
pub fn list_mp3_files(folder: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(folder).map_err(|error| match error.kind() {
        ErrorKind::NotFound => ToolError::MissingFolder(folder.to_path_buf()),
        _ => ToolError::Io(error),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let raw_name = entry.file_name();
        if !is_mp3_name(&raw_name.to_string_lossy()) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            debug!(path = %path.display(), "skipping directory");
            continue;
        }
        match utf8_name(raw_name, &path) {
            Ok(name) => names.push(name),
            Err(error) => warn!(%error, "skipping file"),
        }
    }

    debug!(folder = %folder.display(), file_count = names.len(), "scanned folder");
    Ok(names)
}

fn is_mp3_name(name: &str) -> bool {
    name.to_lowercase().ends_with(MP3_SUFFIX)
}

fn utf8_name(raw_name: OsString, path: &Path) -> Result<String> {
    raw_name
        .into_string()
        .map_err(|_| ToolError::NonUtf8FileName(path.to_path_buf()))
}
