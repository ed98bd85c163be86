use axum::{
    Json,
    extract::{Path, Query, State, rejection::{JsonRejection, QueryRejection}},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::warn;

use quotes_core::QuoteError;
use quotes_types::api::{
    CreateQuoteResponse, MessageBody, QuoteByIdQuery, RandomQuotesQuery, SearchQuery,
};

use crate::auth::{AppState, run_blocking};
use crate::error::ApiError;

/// GET /api/v1/get-random-quotes?n= — `n` defaults to 1 and is clamped into
/// `1..=random_limit`.
pub async fn random_quotes(
    State(state): State<AppState>,
    query: Result<Query<RandomQuotesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let limit = i64::try_from(state.random_limit.max(1)).unwrap_or(i64::MAX);
    let n = query.n.unwrap_or(1).clamp(1, limit) as usize;

    let quotes = run_blocking(&state, move |quotes| quotes.random(n)).await?;
    Ok(Json(quotes))
}

/// GET /api/v1/get-quote-by-id?id=
pub async fn quote_by_id(
    State(state): State<AppState>,
    query: Result<Query<QuoteByIdQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let id = query.id.ok_or(ApiError::BadRequest("Query parameter missing"))?;

    let quote = run_blocking(&state, move |quotes| quotes.get(&id)).await?;
    Ok(Json(quote))
}

/// GET /api/v1/search?q=
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(invalid_query)?;
    let q = query.q.ok_or(ApiError::BadRequest("Missing search query"))?;

    let quotes = run_blocking(&state, move |quotes| quotes.search(&q)).await?;
    Ok(Json(quotes))
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    warn!("Rejected query string: {}", rejection);
    ApiError::BadRequest("Invalid query parameter")
}

/// POST /api/v1/add-quote — body is the array of messages.
pub async fn add_quote(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| {
        warn!("Unparseable add-quote body: {}", e);
        ApiError::MalformedRequest
    })?;

    let quote = run_blocking(&state, move |quotes| quotes.add(&payload)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateQuoteResponse {
            message: "Quote successfully created".into(),
            permalink: format!("{}/id/{}", state.base_url, quote.id),
            id: quote.id,
        }),
    ))
}

/// DELETE /api/v1/delete-quote/{id}
pub async fn delete_quote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let target = id.clone();
    run_blocking(&state, move |quotes| {
        quotes.delete(&target).map_err(|e| match e {
            QuoteError::NotFound(_) => {
                ApiError::NotFound(format!("Quote with ID {} not found", target))
            }
            other => other.into(),
        })
    })
    .await?;

    Ok(Json(MessageBody::new(format!(
        "Quote with ID {} successfully deleted",
        id
    ))))
}
