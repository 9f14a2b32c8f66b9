//! DTOs for reading a single short link.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Original URL behind a key, returned without counting a hit.
#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub url: String,
}

/// Hit counter and creation time of a link.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub created_at: DateTime<Utc>,
}
