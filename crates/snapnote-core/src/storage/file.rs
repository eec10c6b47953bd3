//! Directory-backed durable store: one file per key.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::KeyValueStore;
use crate::{Error, Result};

const VALUE_EXTENSION: &str = "json";

/// `KeyValueStore` that keeps each key in its own file under `root`.
///
/// File names are the percent-encoded key, so keys such as `notes_app:notes`
/// are safe on every platform. Values are written to a sibling temp file and
/// renamed into place; readers see either the old value or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory when needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await.map_err(|error| {
            Error::Storage(format!(
                "Failed to create data directory {}: {error}",
                root.display()
            ))
        })?;
        tracing::debug!("Opened file store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{VALUE_EXTENSION}", urlencoding::encode(key)))
    }

    /// A temp path unique to one write of `key`.
    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(
            ".{}.{}.tmp",
            urlencoding::encode(key),
            Uuid::now_v7().simple()
        ))
    }
}

/// Write `value` to `temp`, flush it to disk and rename it over `target`.
/// The temp file is removed on any failure.
async fn replace_file(temp: &Path, target: &Path, value: &str) -> io::Result<()> {
    let result = async {
        let mut file = tokio::fs::File::create(temp).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(temp, target).await
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(temp).await;
    }
    result
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        replace_file(&self.temp_path_for(key), &self.path_for(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        names.sort();
        names
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        assert_eq!(store.get("notes_app:notes").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store.set("notes_app:notes", "[]").await.unwrap();
        store.set("notes_app:notes", "[1]").await.unwrap();

        assert_eq!(
            store.get("notes_app:notes").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn key_is_percent_encoded_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.set("@notes_app:notes", "[]").await.unwrap();

        let path = store.path_for("@notes_app:notes");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("%40notes_app%3Anotes.json")
        );
        assert!(path.exists());
    }

    #[tokio::test]
    async fn no_temp_files_left_after_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.set("k", "value").await.unwrap();

        assert_eq!(file_names(dir.path()), vec!["k.json".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_to_one_key_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::open(dir.path()).await.unwrap());

        for round in 0..50 {
            let first = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.set("k", &format!("a{round}")).await })
            };
            let second = {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.set("k", &format!("b{round}")).await })
            };
            let (first, second) = tokio::join!(first, second);
            first.unwrap().unwrap();
            second.unwrap().unwrap();

            let value = store.get("k").await.unwrap().unwrap();
            assert!(value == format!("a{round}") || value == format!("b{round}"));
        }

        assert_eq!(file_names(dir.path()), vec!["k.json".to_string()]);
    }

    #[tokio::test]
    async fn failed_temp_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.set("k", "old").await.unwrap();

        let temp = dir.path().join("missing").join("k.tmp");
        assert!(replace_file(&temp, &store.path_for("k"), "new").await.is_err());

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("old"));
        assert_eq!(file_names(dir.path()), vec!["k.json".to_string()]);
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_and_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();
        store.set("k", "old").await.unwrap();

        let temp = store.temp_path_for("k");
        let unreachable = dir.path().join("missing").join("k.json");
        assert!(replace_file(&temp, &unreachable, "new").await.is_err());

        assert!(!temp.exists());
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("old"));
        assert_eq!(file_names(dir.path()), vec!["k.json".to_string()]);
    }

    #[tokio::test]
    async fn remove_missing_key_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).await.unwrap();

        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn open_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let store = FileStore::open(&root).await.unwrap();
        assert!(store.root().is_dir());
    }
}
