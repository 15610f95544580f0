use thiserror::Error;

/// Message used when a failed response carries no readable body
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16, message: String },

    #[error("Item not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Unexpected API response format: {0}")]
    Protocol(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::NotFound => Some(404),
            ClientError::Validation(_) => Some(400),
            ClientError::Protocol(_) | ClientError::Transport(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
