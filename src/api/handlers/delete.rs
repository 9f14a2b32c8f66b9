//! Handler for link deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::error::AppError;
use crate::state::AppState;

/// Deletes a link and evicts it from the cache.
///
/// `DELETE /api/shortener/{key}` answers `204 No Content`, including for
/// keys that never existed.
pub async fn delete_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.short_link_service.delete(&key).await?;

    tracing::info!(%key, "Short link deleted");

    Ok(StatusCode::NO_CONTENT)
}
