//! HTTP client with an in-memory mirror of the item list.

use domain_items::{CreateItem, Item, ItemPage, Pagination, StatsSnapshot};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{ClientError, ClientResult, UNKNOWN_ERROR};

/// Page size requested by default; large enough to hold the whole catalog
/// for client-side search and paging.
pub const DEFAULT_FETCH_LIMIT: i64 = 500;

/// Query for [`CatalogClient::fetch_items`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl FetchParams {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            q: Some(term.into()),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct ItemsQuery<'a> {
    limit: i64,
    page: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
}

/// Both list shapes the API has returned over time
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsResponse {
    Paged(ItemPage),
    Bare(Vec<Item>),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Local copy of the last fetched item list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemsMirror {
    pub items: Vec<Item>,
    /// `None` when the server answered with a bare array
    pub pagination: Option<Pagination>,
    pub is_loading: bool,
}

/// Catalog API client
///
/// Clones share the same mirror.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
    mirror: Arc<RwLock<ItemsMirror>>,
}

impl CatalogClient {
    /// `base_url` is the API root, e.g. `http://localhost:3001/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            mirror: Arc::new(RwLock::new(ItemsMirror::default())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page of items and replace the mirror with it.
    ///
    /// On failure the mirrored items are left as they were.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_items(&self, params: FetchParams) -> ClientResult<()> {
        self.mirror.write().await.is_loading = true;
        let result = self.request_items(&params).await;

        let mut mirror = self.mirror.write().await;
        mirror.is_loading = false;
        match result {
            Ok(ItemsResponse::Paged(page)) => {
                mirror.items = page.items;
                mirror.pagination = Some(page.pagination);
                Ok(())
            }
            Ok(ItemsResponse::Bare(items)) => {
                mirror.items = items;
                mirror.pagination = None;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error fetching items: {}", e);
                Err(e)
            }
        }
    }

    async fn request_items(&self, params: &FetchParams) -> ClientResult<ItemsResponse> {
        let query = ItemsQuery {
            limit: params.limit.unwrap_or(DEFAULT_FETCH_LIMIT),
            page: params.page.unwrap_or(1),
            q: params.q.as_deref(),
        };

        let response = self
            .http
            .get(format!("{}/items", self.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Protocol(e.to_string()))
    }

    /// Fetch one item. The mirror is not touched.
    #[instrument(skip(self))]
    pub async fn fetch_item_by_id(&self, id: i64) -> ClientResult<Item> {
        let response = self
            .http
            .get(format!("{}/items/{}", self.base_url, id))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status if status.is_success() => decode(response).await,
            _ => Err(http_error(response).await),
        }
    }

    /// Create an item and append the stored record to the mirror.
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: &CreateItem) -> ClientResult<Item> {
        let response = self
            .http
            .post(format!("{}/items", self.base_url))
            .json(input)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = failure_message(response).await;
            return Err(if status == StatusCode::BAD_REQUEST {
                ClientError::Validation(message)
            } else {
                ClientError::Http {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        let item: Item = decode(response).await?;
        self.mirror.write().await.items.push(item.clone());

        tracing::info!(item_id = item.id, "Item created");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn fetch_stats(&self) -> ClientResult<StatsSnapshot> {
        let response = self
            .http
            .get(format!("{}/stats", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }
        decode(response).await
    }

    /// Snapshot of the mirror
    pub async fn mirror(&self) -> ItemsMirror {
        self.mirror.read().await.clone()
    }

    pub async fn items(&self) -> Vec<Item> {
        self.mirror.read().await.items.clone()
    }

    pub async fn pagination(&self) -> Option<Pagination> {
        self.mirror.read().await.pagination
    }

    pub async fn is_loading(&self) -> bool {
        self.mirror.read().await.is_loading
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Protocol(e.to_string()))
}

async fn http_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    ClientError::Http {
        status,
        message: failure_message(response).await,
    }
}

/// The `message` field of an error body, or a generic text.
async fn failure_message(response: Response) -> String {
    let status = response.status().as_u16();
    match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => message,
        Ok(_) => format!("HTTP error! status: {}", status),
        Err(_) => UNKNOWN_ERROR.to_string(),
    }
}
