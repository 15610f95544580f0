//! Catalog Client
//!
//! HTTP facade over the catalog API for UI code. It keeps an in-memory
//! mirror of the last fetched item list and provides the list helpers the
//! item pages use (local search, fixed-size paging and row virtualization).
//!
//! ```rust,no_run
//! use catalog_client::{CatalogClient, FetchParams, ItemsView};
//!
//! # async fn example() -> Result<(), catalog_client::ClientError> {
//! let client = CatalogClient::new("http://localhost:3001/api");
//! client.fetch_items(FetchParams::default()).await?;
//!
//! let items = client.items().await;
//! let mut view = ItemsView::new();
//! view.set_search("desk");
//! let page = view.render(&items);
//! println!("{} of {} pages", page.page, page.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod view;

pub use client::{CatalogClient, FetchParams, ItemsMirror};
pub use error::{ClientError, ClientResult};
pub use view::{ItemsView, ViewPage, VirtualWindow};
