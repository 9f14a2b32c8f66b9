//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{HealthService, ShortLinkService};

/// State shared by all HTTP handlers.
///
/// Cloning is cheap: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub short_link_service: Arc<ShortLinkService>,
    pub health_service: Arc<HealthService>,
    /// Bearer secret required by the protected endpoints.
    pub api_secret: Arc<str>,
    /// Where redirects for unknown keys are sent; `None` answers with 404.
    pub link_not_found_redirect_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        short_link_service: Arc<ShortLinkService>,
        health_service: Arc<HealthService>,
        api_secret: impl Into<Arc<str>>,
        link_not_found_redirect_url: Option<String>,
    ) -> Self {
        Self {
            short_link_service,
            health_service,
            api_secret: api_secret.into(),
            link_not_found_redirect_url: link_not_found_redirect_url.map(Into::into),
        }
    }
}
