//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::{AppError, ShortLinkError};
use crate::state::AppState;

/// Redirects a key to its original URL and counts the hit.
///
/// # Endpoint
///
/// `GET /api/shortener/{key}/redirect`
///
/// # Behavior
///
/// - Known key: `302 Found` to the original URL
/// - Unknown key with `LINK_NOT_FOUND_REDIRECT_URL` set: `302 Found` to that URL
/// - Unknown key otherwise: `404 Not Found`
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.short_link_service.original_url(&key).await {
        Ok(url) => found(&url),
        Err(ShortLinkError::NotFound { key }) => match state.link_not_found_redirect_url {
            Some(ref fallback) => {
                tracing::debug!(%key, "Unknown key, redirecting to fallback");
                found(fallback)
            }
            None => Err(ShortLinkError::NotFound { key }.into()),
        },
        Err(e) => Err(e.into()),
    }
}

fn found(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location).map_err(|_| {
        tracing::error!(location, "Stored URL is not a valid Location header");
        AppError::internal("Stored URL cannot be redirected to", serde_json::Value::Null)
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
