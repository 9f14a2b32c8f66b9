//! Short link use cases consumed by the HTTP layer and the admin CLI.

use chrono::{DateTime, Utc};

use super::link_store::LinkStore;
use crate::domain::entities::ShortLink;
use crate::error::ShortLinkError;
use crate::utils::key_generator::is_valid_key;

/// Input of [`ShortLinkService::create`].
#[derive(Debug, Clone)]
pub struct CreateInput {
    pub original_url: String,
}

/// Result of [`ShortLinkService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutput {
    pub key: String,
    pub short_url: String,
}

/// Result of [`ShortLinkService::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOutput {
    pub hits: u64,
    pub created_at: DateTime<Utc>,
}

/// Validates requests and shapes link store results for callers.
///
/// Keys that could never have been generated are answered with
/// [`ShortLinkError::NotFound`] without touching the cache or the store.
pub struct ShortLinkService {
    store: LinkStore,
}

impl ShortLinkService {
    pub fn new(store: LinkStore) -> Self {
        Self { store }
    }

    /// Shortens a URL.
    ///
    /// # Errors
    ///
    /// Returns [`ShortLinkError::InvalidUrl`] for malformed input and the
    /// link store errors otherwise.
    pub async fn create(&self, input: CreateInput) -> Result<CreateOutput, ShortLinkError> {
        let link = self.store.create(input.original_url.trim()).await?;

        Ok(CreateOutput {
            key: link.key,
            short_url: link.short_url,
        })
    }

    /// Returns the destination for a redirect and counts the hit.
    pub async fn original_url(&self, key: &str) -> Result<String, ShortLinkError> {
        ensure_key_shape(key)?;
        self.store.resolve(key).await
    }

    /// Returns the stored link without counting a hit.
    pub async fn expand(&self, key: &str) -> Result<ShortLink, ShortLinkError> {
        ensure_key_shape(key)?;
        self.store.expand(key).await
    }

    /// Deletes a link. Unknown keys succeed.
    pub async fn delete(&self, key: &str) -> Result<(), ShortLinkError> {
        if !is_valid_key(key) {
            return Ok(());
        }
        self.store.delete(key).await
    }

    pub async fn stats(&self, key: &str) -> Result<StatsOutput, ShortLinkError> {
        ensure_key_shape(key)?;
        let stats = self.store.stats(key).await?;

        Ok(StatsOutput {
            hits: stats.hits,
            created_at: stats.created_at,
        })
    }
}

fn ensure_key_shape(key: &str) -> Result<(), ShortLinkError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(ShortLinkError::NotFound {
            key: key.to_string(),
        })
    }
}
