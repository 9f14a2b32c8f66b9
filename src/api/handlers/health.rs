//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: `SELECT 1` through the repository
/// 2. **Cache**: Redis PING
///
/// # Response
///
/// ```json
/// {
///   "all_healthy": true,
///   "version": "0.1.0",
///   "services": [
///     { "name": "database", "healthy": true, "check_duration_ms": 1 },
///     { "name": "cache", "healthy": true, "check_duration_ms": 0 }
///   ],
///   "server_time": "2025-01-01T00:00:00Z"
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let report = state.health_service.check().await;
    let all_healthy = report.all_healthy;

    let response = HealthResponse::from_report(report, Utc::now());

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
