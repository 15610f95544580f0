//! Item Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::clock::{Clock, SystemClock};
use crate::error::{ItemError, ItemResult};
use crate::models::{
    CreateItem, INVALID_PAYLOAD, Item, ItemPage, ItemQuery, NEGATIVE_PRICE, StatsSnapshot,
};
use crate::query::{self, PageRequest};
use crate::repository::ItemStore;
use crate::stats::StatsCache;

/// Item service providing the catalog operations
///
/// Every query reads the collection fresh from the store; only stats are
/// cached.
pub struct ItemService<S: ItemStore, C: Clock = SystemClock> {
    store: Arc<S>,
    clock: Arc<C>,
    stats: Arc<StatsCache<S, C>>,
}

impl<S: ItemStore> ItemService<S, SystemClock> {
    /// Create a new ItemService using the wall clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: ItemStore, C: Clock> ItemService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        let store = Arc::new(store);
        let clock = Arc::new(clock);
        let stats = Arc::new(StatsCache::new(Arc::clone(&store), Arc::clone(&clock)));

        Self {
            store,
            clock,
            stats,
        }
    }

    /// Search and paginate the collection
    #[instrument(skip(self))]
    pub async fn find_items(&self, params: ItemQuery) -> ItemResult<ItemPage> {
        let request = PageRequest::new(params.page, params.limit)?;
        let items = self.store.load_all().await?;

        Ok(query::find(items, params.q.as_deref(), request))
    }

    /// Look up an item from a raw path segment
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, raw_id: &str) -> ItemResult<Item> {
        let id = raw_id
            .parse::<i64>()
            .map_err(|_| ItemError::InvalidId(raw_id.to_string()))?;

        self.get_item(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(ItemError::NotFound(id))
    }

    /// Validate, stamp and persist a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let input = CreateItem::new(input.name.trim(), input.category.trim(), input.price);

        if input.name.is_empty() || input.category.is_empty() || !input.price.is_finite() {
            return Err(ItemError::Validation(INVALID_PAYLOAD.to_string()));
        }
        if input.price < 0.0 {
            return Err(ItemError::Validation(NEGATIVE_PRICE.to_string()));
        }
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let item = Item {
            id: self.clock.now().timestamp_millis(),
            name: input.name,
            category: input.category,
            price: input.price,
        };

        let item = self.store.append(item).await?;
        self.stats.invalidate().await;

        tracing::info!(item_id = item.id, "Item created");
        Ok(item)
    }

    /// Aggregate statistics, served from cache while the store is unchanged
    pub async fn stats(&self) -> ItemResult<StatsSnapshot> {
        self.stats.get().await
    }

    /// Succeeds when the backing store is reachable
    pub async fn check_storage(&self) -> ItemResult<()> {
        self.store.last_modified().await.map(|_| ())
    }
}

impl<S: ItemStore, C: Clock> Clone for ItemService<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            stats: Arc::clone(&self.stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::repository::{MockItemStore, StoreVersion};
    use chrono::{TimeZone, Utc};
    use std::time::SystemTime;

    const NOW_MS: i64 = 1_704_067_200_000;

    fn clock() -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(|| Utc.timestamp_millis_opt(NOW_MS).unwrap());
        clock
    }

    fn seed() -> Vec<Item> {
        vec![
            Item {
                id: 1,
                name: "Laptop Pro".to_string(),
                category: "Electronics".to_string(),
                price: 2499.0,
            },
            Item {
                id: 4,
                name: "Ergonomic Chair".to_string(),
                category: "Furniture".to_string(),
                price: 799.0,
            },
        ]
    }

    #[tokio::test]
    async fn test_create_item_trims_and_stamps_id() {
        let mut store = MockItemStore::new();
        store
            .expect_append()
            .withf(|item| item.name == "Desk Lamp" && item.category == "Lighting")
            .times(1)
            .returning(Ok);

        let service = ItemService::with_clock(store, clock());
        let item = service
            .create_item(CreateItem::new("  Desk Lamp ", " Lighting  ", 49.5))
            .await
            .unwrap();

        assert_eq!(item.id, NOW_MS);
        assert_eq!(item.name, "Desk Lamp");
        assert_eq!(item.price, 49.5);
    }

    #[tokio::test]
    async fn test_create_item_rejects_blank_name() {
        let mut store = MockItemStore::new();
        store.expect_append().never();

        let service = ItemService::with_clock(store, clock());
        let err = service
            .create_item(CreateItem::new("   ", "Furniture", 10.0))
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::Validation(ref msg) if msg == INVALID_PAYLOAD));
    }

    #[tokio::test]
    async fn test_create_item_rejects_negative_price() {
        let mut store = MockItemStore::new();
        store.expect_append().never();

        let service = ItemService::with_clock(store, clock());
        let err = service
            .create_item(CreateItem::new("Desk", "Furniture", -100.0))
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::Validation(ref msg) if msg == NEGATIVE_PRICE));
    }

    #[tokio::test]
    async fn test_create_item_rejects_non_finite_price() {
        let mut store = MockItemStore::new();
        store.expect_append().never();

        let service = ItemService::with_clock(store, clock());
        let err = service
            .create_item(CreateItem::new("Desk", "Furniture", f64::NAN))
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::Validation(ref msg) if msg == INVALID_PAYLOAD));
    }

    #[tokio::test]
    async fn test_create_item_propagates_store_failure() {
        let mut store = MockItemStore::new();
        store
            .expect_append()
            .returning(|_| Err(ItemError::Storage("Failed to write data: denied".to_string())));

        let service = ItemService::with_clock(store, clock());
        let err = service
            .create_item(CreateItem::new("Desk", "Furniture", 10.0))
            .await
            .unwrap_err();

        assert!(matches!(err, ItemError::Storage(_)));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let mut store = MockItemStore::new();
        store.expect_load_all().returning(|| Ok(seed()));

        let service = ItemService::with_clock(store, clock());

        assert_eq!(service.find_by_id("4").await.unwrap().name, "Ergonomic Chair");
        assert!(matches!(
            service.find_by_id("999").await,
            Err(ItemError::NotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_find_by_id_rejects_non_numeric() {
        let mut store = MockItemStore::new();
        store.expect_load_all().never();

        let service = ItemService::with_clock(store, clock());

        for raw in ["invalid", "12abc", "", "1.5"] {
            assert!(matches!(
                service.find_by_id(raw).await,
                Err(ItemError::InvalidId(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_find_items_validates_before_loading() {
        let mut store = MockItemStore::new();
        store.expect_load_all().never();

        let service = ItemService::with_clock(store, clock());
        let result = service
            .find_items(ItemQuery {
                page: Some(0),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(ItemError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_items_filters_and_paginates() {
        let mut store = MockItemStore::new();
        store.expect_load_all().returning(|| Ok(seed()));

        let service = ItemService::with_clock(store, clock());
        let page = service
            .find_items(ItemQuery {
                q: Some("chair".to_string()),
                page: None,
                limit: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 4);
        assert_eq!(page.pagination.total, 1);
    }

    #[tokio::test]
    async fn test_create_invalidates_stats() {
        let mut store = MockItemStore::new();
        let version = StoreVersion {
            modified: SystemTime::UNIX_EPOCH,
            len: 10,
        };
        store
            .expect_last_modified()
            .returning(move || Ok(version));
        store.expect_load_all().times(2).returning(|| Ok(seed()));
        store.expect_append().times(1).returning(Ok);

        let service = ItemService::with_clock(store, clock());

        service.stats().await.unwrap();
        service
            .create_item(CreateItem::new("Lamp", "Lighting", 20.0))
            .await
            .unwrap();
        service.stats().await.unwrap();
    }

    #[tokio::test]
    async fn test_check_storage() {
        let mut store = MockItemStore::new();
        store
            .expect_last_modified()
            .returning(|| Err(ItemError::Storage("Failed to read data: missing".to_string())));

        let service = ItemService::with_clock(store, clock());
        assert!(service.check_storage().await.is_err());
    }
}
