//! Business logic services for the application layer.

pub mod health_service;
pub mod link_store;
pub mod short_link_service;

pub use health_service::{HealthReport, HealthService, ServiceHealth};
pub use link_store::LinkStore;
pub use short_link_service::{CreateInput, CreateOutput, ShortLinkService, StatsOutput};
