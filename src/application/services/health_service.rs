//! Health checks for the store and the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::CacheService;

/// Result of checking one backing service.
#[derive(Debug, Clone)]
pub struct ServiceHealth {
    pub name: &'static str,
    pub healthy: bool,
    pub error: Option<String>,
    pub check_duration: Duration,
}

/// Aggregated health of all backing services.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub all_healthy: bool,
    pub services: Vec<ServiceHealth>,
}

/// Pings every backing service concurrently.
pub struct HealthService {
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<dyn CacheService>,
}

impl HealthService {
    pub fn new(repository: Arc<dyn ShortLinkRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    pub async fn check(&self) -> HealthReport {
        let (database, cache) = tokio::join!(self.check_database(), self.check_cache());
        let services = vec![database, cache];

        let all_healthy = services.iter().all(|s| s.healthy);
        if !all_healthy {
            tracing::warn!(?services, "Unhealthy service(s)");
        }

        HealthReport {
            all_healthy,
            services,
        }
    }

    async fn check_database(&self) -> ServiceHealth {
        let start = Instant::now();
        let result = self.repository.ping().await;

        ServiceHealth {
            name: "database",
            healthy: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
            check_duration: start.elapsed(),
        }
    }

    async fn check_cache(&self) -> ServiceHealth {
        let start = Instant::now();
        let healthy = self.cache.health_check().await;

        ServiceHealth {
            name: "cache",
            healthy,
            error: (!healthy).then(|| "Cache PING failed".to_string()),
            check_duration: start.elapsed(),
        }
    }
}
