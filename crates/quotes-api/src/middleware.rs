use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::{AppState, presented_token, run_blocking};
use crate::error::ApiError;

/// Rejects the request unless its `Authorization` header carries an active
/// token.
pub async fn require_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = presented_token(req.headers())
        .ok_or(ApiError::Unauthorized)?
        .to_string();

    let authorized = run_blocking(&state, move |quotes| quotes.is_authorized(&token)).await?;
    if !authorized {
        warn!("Rejected {} {}: unknown or inactive token", req.method(), req.uri().path());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}
