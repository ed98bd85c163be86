use std::sync::Arc;

use axum::http::{HeaderMap, header};
use tracing::error;

use quotes_core::QuoteService;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub quotes: QuoteService,
    /// Public site root used to build permalinks, without trailing slash.
    pub base_url: String,
    /// Most quotes a single random request may return.
    pub random_limit: usize,
}

/// Token presented in the `Authorization` header. Both the bare token and
/// the `Bearer <token>` form are accepted.
pub fn presented_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value
        .strip_prefix("Bearer")
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .unwrap_or(value)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Runs a blocking store operation off the async runtime.
pub async fn run_blocking<F, T, E>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&QuoteService) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.quotes))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(Into::into)
}
