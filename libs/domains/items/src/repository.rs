use async_trait::async_trait;
use std::time::SystemTime;

use crate::error::ItemResult;
use crate::models::Item;

/// Snapshot of the backing file's metadata, compared to detect writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreVersion {
    pub modified: SystemTime,
    pub len: u64,
}

/// Persistence for the item collection
///
/// The whole collection is read and written as one unit. There are no
/// partial updates and no deletes; `append` is the only write path used
/// by the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Read the full collection in insertion order
    async fn load_all(&self) -> ItemResult<Vec<Item>>;

    /// Replace the full collection
    async fn save_all(&self, items: &[Item]) -> ItemResult<()>;

    /// Add one item at the end of the collection
    async fn append(&self, item: Item) -> ItemResult<Item> {
        let mut items = self.load_all().await?;
        items.push(item.clone());
        self.save_all(&items).await?;
        Ok(item)
    }

    /// Current version of the persisted collection
    async fn last_modified(&self) -> ItemResult<StoreVersion>;
}
