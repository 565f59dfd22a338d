use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use bms_session::AuthError;
use bms_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("authentication required")]
    Unauthorized,

    #[error("insufficient role")]
    Forbidden,

    #[error("invalid item: {0}")]
    Validation(String),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::Auth(AuthError::InvalidCredentials) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Auth(AuthError::MissingField(_)) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Store(StoreError::InvalidPosition { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
