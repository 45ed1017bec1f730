//! Storage location configuration.

use std::path::PathBuf;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "songs.json";

/// Environment variable overriding the data file location.
pub const DATA_FILE_ENV: &str = "RIFFSTORE_DATA";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// `RIFFSTORE_DATA` if set and non-empty, else the default.
    pub fn from_env() -> Self {
        match std::env::var(DATA_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_data_file() {
        assert_eq!(StoreConfig::default().data_file, PathBuf::from("songs.json"));
    }

    #[test]
    fn test_new_keeps_path() {
        let config = StoreConfig::new("/srv/riff/songs.json");
        assert_eq!(config.data_file, PathBuf::from("/srv/riff/songs.json"));
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        std::env::set_var(DATA_FILE_ENV, "/srv/riff/other.json");
        assert_eq!(
            StoreConfig::from_env().data_file,
            PathBuf::from("/srv/riff/other.json")
        );

        std::env::set_var(DATA_FILE_ENV, "  ");
        assert_eq!(StoreConfig::from_env(), StoreConfig::default());

        std::env::remove_var(DATA_FILE_ENV);
        assert_eq!(StoreConfig::from_env(), StoreConfig::default());
    }
}
