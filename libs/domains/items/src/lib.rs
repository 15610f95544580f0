//! Items Domain
//!
//! The catalog's item collection: a JSON file backed store, search and
//! pagination over it, cached aggregate statistics and the HTTP handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, query engine, stats cache
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← Persistence (trait + JSON file implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{handlers, JsonFileItemStore, ItemService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileItemStore::new("data/items.json");
//! store.ensure_exists().await?;
//!
//! let service = ItemService::new(store);
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod error;
pub mod handlers;
pub mod json_file;
pub mod models;
pub mod query;
pub mod repository;
pub mod service;
pub mod stats;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use error::{ItemError, ItemResult};
pub use handlers::ApiDoc;
pub use json_file::JsonFileItemStore;
pub use models::{CreateItem, Item, ItemPage, ItemQuery, Pagination, PriceRange, StatsSnapshot};
pub use query::PageRequest;
pub use repository::{ItemStore, StoreVersion};
pub use service::ItemService;
pub use stats::{StatsCache, compute_stats};
