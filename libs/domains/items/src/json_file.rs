//! JSON file implementation of ItemStore

use async_trait::async_trait;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::repository::{ItemStore, StoreVersion};

/// Item store backed by a single pretty-printed JSON array on disk
///
/// Writes from this process are serialized; other processes writing the
/// same file are not coordinated with.
pub struct JsonFileItemStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileItemStore {
    /// Create a store for the given file. The file is not touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty collection if the file does not exist yet.
    ///
    /// Returns `true` when a new file was written.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn ensure_exists(&self) -> ItemResult<bool> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(false),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| ItemError::Storage(format!("Failed to write data: {}", e)))?;
                }
                self.write_items(&[]).await?;
                tracing::warn!("Data file was missing, created an empty collection");
                Ok(true)
            }
            Err(e) => Err(ItemError::Storage(format!("Failed to read data: {}", e))),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Serialize and replace the file. Callers hold `write_lock`.
    async fn write_items(&self, items: &[Item]) -> ItemResult<()> {
        let raw = serde_json::to_string_pretty(items)?;
        let tmp = self.temp_path();

        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| ItemError::Storage(format!("Failed to write data: {}", e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| ItemError::Storage(format!("Failed to write data: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl ItemStore for JsonFileItemStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_all(&self) -> ItemResult<Vec<Item>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ItemError::Storage(format!("Failed to read data: {}", e)))?;
        let items: Vec<Item> = serde_json::from_str(&raw)?;

        tracing::debug!(count = items.len(), "Loaded item collection");
        Ok(items)
    }

    #[instrument(skip(self, items), fields(path = %self.path.display(), count = items.len()))]
    async fn save_all(&self, items: &[Item]) -> ItemResult<()> {
        let _guard = self.write_lock.lock().await;
        self.write_items(items).await
    }

    #[instrument(skip(self, item), fields(path = %self.path.display(), item_id = item.id))]
    async fn append(&self, item: Item) -> ItemResult<Item> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.load_all().await?;
        items.push(item.clone());
        self.write_items(&items).await?;

        tracing::info!(total = items.len(), "Item appended to collection");
        Ok(item)
    }

    async fn last_modified(&self) -> ItemResult<StoreVersion> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| ItemError::Storage(format!("Failed to read data: {}", e)))?;
        let modified = metadata
            .modified()
            .map_err(|e| ItemError::Storage(format!("Failed to read data: {}", e)))?;

        Ok(StoreVersion {
            modified,
            len: metadata.len(),
        })
    }
}
