//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{HealthReport, ServiceHealth};

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub all_healthy: bool,
    pub version: &'static str,
    pub services: Vec<CheckStatus>,
    pub server_time: DateTime<Utc>,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub name: &'static str,
    pub healthy: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub check_duration_ms: u64,
}

impl From<ServiceHealth> for CheckStatus {
    fn from(health: ServiceHealth) -> Self {
        Self {
            name: health.name,
            healthy: health.healthy,
            error: health.error,
            check_duration_ms: u64::try_from(health.check_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl HealthResponse {
    pub fn from_report(report: HealthReport, server_time: DateTime<Utc>) -> Self {
        Self {
            all_healthy: report.all_healthy,
            version: env!("CARGO_PKG_VERSION"),
            services: report.services.into_iter().map(Into::into).collect(),
            server_time,
        }
    }
}
