//! Aggregate statistics with a version-checked cache.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::clock::Clock;
use crate::error::ItemResult;
use crate::models::{Item, PriceRange, StatsSnapshot};
use crate::repository::{ItemStore, StoreVersion};

/// Compute the snapshot for `items` in one pass.
///
/// An empty collection yields the zeroed snapshot without a timestamp.
pub fn compute_stats(items: &[Item], now: DateTime<Utc>) -> StatsSnapshot {
    if items.is_empty() {
        return StatsSnapshot::default();
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut categories: BTreeMap<String, usize> = BTreeMap::new();

    for item in items {
        sum += item.price;
        min = min.min(item.price);
        max = max.max(item.price);
        *categories.entry(item.category.clone()).or_default() += 1;
    }

    StatsSnapshot {
        total: items.len(),
        average_price: sum / items.len() as f64,
        categories,
        price_range: PriceRange { min, max },
        last_updated: Some(now),
    }
}

#[derive(Debug, Clone)]
struct CachedStats {
    version: StoreVersion,
    snapshot: StatsSnapshot,
}

/// Stats memoized against the store version
///
/// Concurrent misses may both recompute; the result is the same either way.
pub struct StatsCache<S: ItemStore, C: Clock> {
    store: Arc<S>,
    clock: Arc<C>,
    entry: RwLock<Option<CachedStats>>,
}

impl<S: ItemStore, C: Clock> StatsCache<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            entry: RwLock::new(None),
        }
    }

    /// Return the cached snapshot, recomputing it when the store changed.
    ///
    /// A failed read is returned as is and the previous entry is kept.
    #[instrument(skip(self))]
    pub async fn get(&self) -> ItemResult<StatsSnapshot> {
        let version = self.store.last_modified().await?;

        if let Some(cached) = self.entry.read().await.as_ref() {
            if cached.version == version {
                tracing::debug!("Stats cache hit");
                return Ok(cached.snapshot.clone());
            }
        }

        let items = self.store.load_all().await?;
        let snapshot = compute_stats(&items, self.clock.now());
        tracing::debug!(total = snapshot.total, "Stats recomputed");

        *self.entry.write().await = Some(CachedStats {
            version,
            snapshot: snapshot.clone(),
        });

        Ok(snapshot)
    }

    /// Drop the cached entry so the next read recomputes.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    /// The currently cached snapshot, if any
    pub async fn cached(&self) -> Option<StatsSnapshot> {
        self.entry.read().await.as_ref().map(|c| c.snapshot.clone())
    }
}
