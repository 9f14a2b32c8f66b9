//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::short_link::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the hit counter and creation time of a link.
///
/// # Endpoint
///
/// `GET /api/shortener/{key}/stats`
///
/// Stats always come from the store, so the counter reflects every
/// redirect that has completed.
///
/// # Errors
///
/// Returns 404 Not Found if the key doesn't exist.
pub async fn stats_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.short_link_service.stats(&key).await?;

    Ok(Json(StatsResponse {
        hits: stats.hits,
        created_at: stats.created_at,
    }))
}
