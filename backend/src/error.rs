use axum::http::StatusCode;
use thiserror::Error;
use tripgen_shared::{BridgeError, FormError};

#[derive(Debug, Error)]
pub enum TripError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("failed to encode plan: {0}")]
    Json(#[from] serde_json::Error),
}

impl TripError {
    /// HTTP routes only surface form and encoding failures; bridge errors
    /// come from the CLI and map to a plain 500 if one ever reaches a route.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TripError::Form(_) => StatusCode::BAD_REQUEST,
            TripError::Bridge(_) | TripError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
