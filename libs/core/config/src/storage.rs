use crate::{env_or_default, ConfigError, FromEnv};
use std::path::{Path, PathBuf};

/// Location of the JSON file the item collection lives in
pub const DEFAULT_DATA_PATH: &str = "data/items.json";

/// Flat-file storage configuration
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_path: PathBuf,
}

impl StorageConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl FromEnv for StorageConfig {
    /// ITEMS_DATA_PATH: defaults to `data/items.json` relative to the working directory
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("ITEMS_DATA_PATH", DEFAULT_DATA_PATH);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::ParseError {
                key: "ITEMS_DATA_PATH".to_string(),
                details: "path cannot be empty".to_string(),
            });
        }

        Ok(Self::new(trimmed))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_default_path() {
        temp_env::with_var_unset("ITEMS_DATA_PATH", || {
            let config = StorageConfig::from_env().unwrap();
            assert_eq!(config.data_path(), Path::new("data/items.json"));
        });
    }

    #[test]
    fn test_storage_config_custom_path() {
        temp_env::with_var("ITEMS_DATA_PATH", Some("/var/lib/catalog/items.json"), || {
            let config = StorageConfig::from_env().unwrap();
            assert_eq!(
                config.data_path(),
                Path::new("/var/lib/catalog/items.json")
            );
        });
    }

    #[test]
    fn test_storage_config_rejects_blank_path() {
        temp_env::with_var("ITEMS_DATA_PATH", Some("   "), || {
            let err = StorageConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("ITEMS_DATA_PATH"));
        });
    }
}
