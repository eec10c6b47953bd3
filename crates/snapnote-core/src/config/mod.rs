//! Store configuration shared by every front end.
//!
//! Settings come from, in priority order: explicit overrides (CLI flags),
//! environment variables, an optional `config.json` in the platform config
//! directory, and finally built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::repository::NOTES_STORAGE_KEY;
use crate::storage::FileStore;
use crate::util::normalize_text_option;
use crate::{Error, NoteRepository, Result};

const APP_DIR_NAME: &str = "snapnote";
const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_DATA_DIR: &str = "SNAPNOTE_DATA_DIR";
pub const ENV_STORAGE_KEY: &str = "SNAPNOTE_STORAGE_KEY";

/// Contents of the optional `config.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub storage_key: Option<String>,
}

impl ConfigFile {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                error
            ))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            Error::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })
    }

    #[cfg(test)]
    pub(crate) fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Resolved settings for opening the note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StoreConfig {
    /// Resolve from the environment and the default config file location.
    pub fn resolve(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let file = match default_config_path() {
            Some(path) => ConfigFile::load_from_path(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve_with(data_dir_override, &file, |name| std::env::var(name).ok())
    }

    /// Resolution with the environment lookup injected.
    pub fn resolve_with(
        data_dir_override: Option<PathBuf>,
        file: &ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let data_dir = data_dir_override
            .or_else(|| normalize_text_option(env(ENV_DATA_DIR)).map(PathBuf::from))
            .or_else(|| file.data_dir.clone())
            .or_else(default_data_dir)
            .ok_or_else(|| {
                Error::Config(format!(
                    "Could not determine a data directory; set {ENV_DATA_DIR}"
                ))
            })?;

        let storage_key = normalize_text_option(env(ENV_STORAGE_KEY))
            .or_else(|| normalize_text_option(file.storage_key.clone()))
            .unwrap_or_else(|| NOTES_STORAGE_KEY.to_string());

        Ok(Self {
            data_dir,
            storage_key,
        })
    }

    /// Open the file-backed repository these settings describe.
    pub async fn open_repository(&self) -> Result<NoteRepository<FileStore>> {
        let store = FileStore::open(&self.data_dir).await?;
        tracing::debug!(
            "Using note store at {} (key '{}')",
            self.data_dir.display(),
            self.storage_key
        );
        Ok(NoteRepository::with_key(store, self.storage_key.clone()))
    }
}

/// `<config dir>/snapnote/config.json`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// `<data dir>/snapnote`, when the platform has a data dir.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn override_wins_over_env_and_file() {
        let file = ConfigFile {
            data_dir: Some(PathBuf::from("/from/file")),
            storage_key: None,
        };
        let config = StoreConfig::resolve_with(
            Some(PathBuf::from("/from/flag")),
            &file,
            env_from(&[(ENV_DATA_DIR, "/from/env")]),
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
        assert_eq!(config.storage_key, NOTES_STORAGE_KEY);
    }

    #[test]
    fn env_wins_over_file() {
        let file = ConfigFile {
            data_dir: Some(PathBuf::from("/from/file")),
            storage_key: Some("file:key".to_string()),
        };
        let config = StoreConfig::resolve_with(
            None,
            &file,
            env_from(&[(ENV_DATA_DIR, "/from/env"), (ENV_STORAGE_KEY, "@notes_app:notes")]),
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
        assert_eq!(config.storage_key, "@notes_app:notes");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let file = ConfigFile {
            data_dir: Some(PathBuf::from("/from/file")),
            storage_key: Some(" file:key ".to_string()),
        };
        let config = StoreConfig::resolve_with(
            None,
            &file,
            env_from(&[(ENV_DATA_DIR, "  "), (ENV_STORAGE_KEY, "")]),
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/from/file"));
        assert_eq!(config.storage_key, "file:key");
    }

    #[test]
    fn config_file_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        assert_eq!(ConfigFile::load_from_path(&path).unwrap(), ConfigFile::default());

        let file = ConfigFile {
            data_dir: Some(dir.path().join("data")),
            storage_key: Some("custom".to_string()),
        };
        file.save_to_path(&path).unwrap();
        assert_eq!(ConfigFile::load_from_path(&path).unwrap(), file);
    }

    #[test]
    fn config_file_rejects_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{"dataDir": "/x"}"#).unwrap();

        assert!(matches!(
            ConfigFile::load_from_path(&path),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn open_repository_uses_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            data_dir: dir.path().join("store"),
            storage_key: "custom".to_string(),
        };

        let repo = config.open_repository().await.unwrap();
        repo.create(crate::NoteDraft::new("Trip", "Beach day", "file://a.jpg"))
            .await
            .unwrap();

        assert_eq!(repo.key(), "custom");
        assert!(repo.store().path_for("custom").exists());
    }
}
