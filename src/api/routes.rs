//! API route configuration.
//!
//! Mutating and statistics endpoints require Bearer authentication via
//! [`crate::api::middleware::auth`]. Redirect and expand are public.

use crate::api::handlers::{
    delete_handler, expand_handler, redirect_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Routes that require the API secret.
///
/// # Endpoints
///
/// - `POST   /shortener`              - Create a short link
/// - `DELETE /shortener/{key}`        - Delete a short link
/// - `GET    /shortener/{key}/stats`  - Hit counter and creation time
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shortener", post(shorten_handler))
        .route("/shortener/{key}", delete(delete_handler))
        .route("/shortener/{key}/stats", get(stats_handler))
}

/// Routes open to anyone holding a short link.
///
/// # Endpoints
///
/// - `GET /shortener/{key}/redirect` - Follow a short link (counts a hit)
/// - `GET /shortener/{key}/expand`   - Reveal the original URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/shortener/{key}/redirect", get(redirect_handler))
        .route("/shortener/{key}/expand", get(expand_handler))
}
