//! Application state management.
//!
//! The state is cloned into each router; the service clones share one
//! store and one stats cache.

use domain_items::{ItemService, JsonFileItemStore};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Item operations over the configured JSON file
    pub service: ItemService<JsonFileItemStore>,
}
