use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("Invalid item ID: {0}")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            ItemError::InvalidId(_) => AppError::InvalidId("Invalid item ID".to_string()),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<serde_json::Error> for ItemError {
    fn from(err: serde_json::Error) -> Self {
        ItemError::Storage(format!("Malformed data: {}", err))
    }
}
