use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use quotes_core::QuoteError;
use quotes_types::api::MessageBody;

/// Caller-facing failures. Rendered as `{ "message": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Malformed request")]
    MalformedRequest,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::MalformedRequest | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::NotFound(_) => Self::NotFound("Quote not found".into()),
            QuoteError::NoResults => Self::NotFound("No quotes found".into()),
            QuoteError::Invalid(e) => {
                warn!("Rejected quote payload: {}", e);
                Self::MalformedRequest
            }
            other @ (QuoteError::IdGenerationExhausted { .. } | QuoteError::Store(_)) => {
                error!("Quote operation failed: {}", other);
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(MessageBody::new(self.to_string()))).into_response()
    }
}
