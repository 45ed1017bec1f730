//! Safety checks on the storage path.
//!
//! The store writes through a `<name>.tmp` sibling before renaming it over
//! the data file. These checks keep the data file from being that sibling.

use crate::error::{Result, StoreError};
use std::path::{Path, PathBuf};

/// Suffix appended to the data file name for the write-then-rename sibling.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path of the temp sibling used while saving `data_file`.
pub fn temp_path_for(data_file: &Path) -> PathBuf {
    let mut name = data_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(TEMP_SUFFIX);
    data_file.with_file_name(name)
}

/// Validates that `data_file` can serve as the canonical storage file.
///
/// Checks:
/// - The path has a file name
/// - The file name does not end in the reserved temp suffix
/// - The path is not an existing directory
pub fn validate_data_path(data_file: &Path) -> Result<()> {
    let name = match data_file.file_name() {
        Some(n) if !n.is_empty() => n.to_string_lossy(),
        _ => {
            return Err(StoreError::InvalidPath(format!(
                "'{}' has no file name",
                data_file.display()
            )))
        }
    };

    if name.ends_with(TEMP_SUFFIX) {
        return Err(StoreError::InvalidPath(format!(
            "'{}' ends in reserved suffix '{}'",
            data_file.display(),
            TEMP_SUFFIX
        )));
    }

    if data_file.is_dir() {
        return Err(StoreError::InvalidPath(format!(
            "'{}' is a directory",
            data_file.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_sibling() {
        let path = PathBuf::from("/data/songs.json");
        assert_eq!(temp_path_for(&path), PathBuf::from("/data/songs.json.tmp"));
    }

    #[test]
    fn test_valid_data_path() {
        assert!(validate_data_path(Path::new("/tmp/riffstore-test/songs.json")).is_ok());
    }

    #[test]
    fn test_reserved_suffix_rejected() {
        let result = validate_data_path(Path::new("/data/songs.json.tmp"));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("reserved suffix"));
    }

    #[test]
    fn test_missing_file_name_rejected() {
        assert!(validate_data_path(Path::new("/")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = PathBuf::from("/tmp/riffstore-test");
        let data = dir.join(OsStr::from_bytes(b"songs\xff.json"));
        assert!(validate_data_path(&data).is_ok());

        let reserved = dir.join(OsStr::from_bytes(b"songs\xff.json.tmp"));
        assert!(validate_data_path(&reserved)
            .unwrap_err()
            .to_string()
            .contains("reserved suffix"));
    }

    #[test]
    fn test_directory_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = validate_data_path(dir.path());
        assert!(result.unwrap_err().to_string().contains("is a directory"));
    }
}
