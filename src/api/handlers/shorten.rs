//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::CreateInput;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shortener`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_url": "https://s.example.com/api/shortener/Qw2rTy/redirect",
///   "key": "Qw2rTy"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` if the body is not valid JSON, lacks `url`, or the URL is rejected
/// - `500 Internal Server Error` if no unique key could be found or the store failed
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let output = state
        .short_link_service
        .create(CreateInput {
            original_url: payload.url,
        })
        .await?;

    tracing::info!(key = %output.key, "Short link created");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: output.short_url,
            key: output.key,
        }),
    ))
}
