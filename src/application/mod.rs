//! Application layer services implementing business logic.
//!
//! Services consume the repository and cache traits and expose the short link
//! operations to the HTTP handlers and the admin CLI.
//!
//! - [`services::link_store::LinkStore`] - Cache-aside create/resolve/expand/delete/stats
//! - [`services::short_link_service::ShortLinkService`] - Input checks and result shaping
//! - [`services::health_service::HealthService`] - Store and cache health fan-in

pub mod services;
