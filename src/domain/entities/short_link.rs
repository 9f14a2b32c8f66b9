//! Short link entity and its projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shortened URL record.
///
/// Every field except `hits` is immutable once the record has been inserted.
/// The entity is serialized to JSON when it is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub key: String,
    pub original_url: String,
    pub short_url: String,
    pub hits: u64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        key: String,
        original_url: String,
        short_url: String,
        hits: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            key,
            original_url,
            short_url,
            hits,
            created_at,
        }
    }
}

/// Input data for inserting a new short link.
///
/// The store assigns the `id`; hits always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub key: String,
    pub original_url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl NewShortLink {
    /// Builds the stored entity once the store has assigned an id.
    pub fn into_short_link(self, id: i64) -> ShortLink {
        ShortLink {
            id,
            key: self.key,
            original_url: self.original_url,
            short_url: self.short_url,
            hits: 0,
            created_at: self.created_at,
        }
    }
}

/// Hit counter and creation time of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    pub hits: u64,
    pub created_at: DateTime<Utc>,
}
