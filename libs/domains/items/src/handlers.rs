use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::clock::Clock;
use crate::error::{ItemError, ItemResult};
use crate::models::{
    CreateItem, INVALID_PAYLOAD, Item, ItemPage, ItemQuery, Pagination, PriceRange, StatsSnapshot,
};
use crate::repository::ItemStore;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, get_stats),
    components(
        schemas(Item, CreateItem, ItemPage, Pagination, PriceRange, StatsSnapshot),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Items", description = "Catalog item endpoints"),
        (name = "Stats", description = "Aggregate catalog statistics")
    )
)]
pub struct ApiDoc;

/// Create the items router with all HTTP endpoints
pub fn router<S, C>(service: ItemService<S, C>) -> Router
where
    S: ItemStore + 'static,
    C: Clock + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", get(get_item))
        .route("/stats", get(get_stats))
        .with_state(shared_service)
}

/// List items with optional search and pagination
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    params(ItemQuery),
    responses(
        (status = 200, description = "One page of matching items", body = ItemPage),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<S: ItemStore, C: Clock>(
    State(service): State<Arc<ItemService<S, C>>>,
    params: Result<Query<ItemQuery>, QueryRejection>,
) -> ItemResult<Json<ItemPage>> {
    let Query(params) = params.map_err(|e| ItemError::Validation(e.body_text()))?;
    let page = service.find_items(params).await?;
    Ok(Json(page))
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created successfully", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<S: ItemStore, C: Clock>(
    State(service): State<Arc<ItemService<S, C>>>,
    payload: Result<ValidatedJson<CreateItem>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let ValidatedJson(input) = payload.map_err(|err| match err {
        AppError::JsonExtractorRejection(rejection) => {
            tracing::debug!("Rejected item payload: {}", rejection.body_text());
            AppError::from(ItemError::Validation(INVALID_PAYLOAD.to_string()))
        }
        other => other,
    })?;

    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<S: ItemStore, C: Clock>(
    State(service): State<Arc<ItemService<S, C>>>,
    Path(id): Path<String>,
) -> ItemResult<Json<Item>> {
    let item = service.find_by_id(&id).await?;
    Ok(Json(item))
}

/// Aggregate statistics over the whole collection
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Current statistics", body = StatsSnapshot),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_stats<S: ItemStore, C: Clock>(
    State(service): State<Arc<ItemService<S, C>>>,
) -> ItemResult<Json<StatsSnapshot>> {
    let stats = service.stats().await?;
    Ok(Json(stats))
}
