use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// A document known to the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Unique document id.
    pub id: String,

    /// File name shown in the picker.
    pub name: String,

    /// Human-readable size, e.g. `"2.4 MB"`.
    pub size: String,

    /// Where the file came from. The contents are never read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Document {
    /// Creates a document record with no backing file.
    pub fn new(id: impl Into<String>, name: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            size: size.into(),
            source: None,
        }
    }
}

/// A file handed to [`crate::documents::DocumentRegistry::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// The file name.
    pub name: String,

    /// Length in bytes.
    pub size_bytes: u64,

    /// Where the file lives, if it came from disk.
    pub source: Option<PathBuf>,
}

impl UploadFile {
    /// Describes an in-memory file.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            source: None,
        }
    }

    /// Describes a file on disk from its metadata alone.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|err| Error::io(format!("cannot stat {}", path.display()), err))?;
        if !metadata.is_file() {
            return Err(Error::validation(
                format!("{} is not a file", path.display()),
                Some("path".to_string()),
            ));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            size_bytes: metadata.len(),
            source: Some(path.to_path_buf()),
        })
    }
}

/// Formats a byte count using base-1024 units rounded to two decimals.
///
/// Trailing zeros are dropped, so 1024 bytes is `"1 KB"` and 1536 bytes is
/// `"1.5 KB"`.  Sizes beyond the gigabyte range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scale: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = bytes as f64 / scale as f64;
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn format_bytes() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn format_scaled_units() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2_516_582), "2.4 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
    }

    #[test]
    fn format_caps_at_gigabytes() {
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn upload_file_from_missing_path() {
        let err = UploadFile::from_path("/definitely/not/here.pdf").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn upload_file_from_path_reads_metadata() {
        let path = std::env::temp_dir().join(format!("buddy-upload-{}.txt", std::process::id()));
        std::fs::write(&path, vec![b'x'; 2048]).unwrap();
        let file = UploadFile::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(file.size_bytes, 2048);
        assert_eq!(file.source.as_deref(), Some(path.as_path()));
        assert!(file.name.starts_with("buddy-upload-"));
    }
}
