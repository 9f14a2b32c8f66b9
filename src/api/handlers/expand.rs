//! Handler for looking up a link without following it.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::short_link::ExpandResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the original URL for a key. Does not count a hit.
///
/// `GET /api/shortener/{key}/expand`
pub async fn expand_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ExpandResponse>, AppError> {
    let link = state.short_link_service.expand(&key).await?;

    Ok(Json(ExpandResponse {
        url: link.original_url,
    }))
}
