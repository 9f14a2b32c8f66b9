//! CORS handling for browser clients.

use axum::http::{Method, header};
use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS middleware.
///
/// Preflight `OPTIONS` requests are answered here, before routing and
/// authentication. Any origin may call the API; credentials travel in the
/// `Authorization` header, never in cookies.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
