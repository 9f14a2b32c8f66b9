//! Cache-aside short link store.
//!
//! [`LinkStore`] combines the key generator, the persistent store and the
//! cache. The store is authoritative; the cache holds two independent
//! projections per key, each expiring after the configured TTL:
//!
//! - `shortener:entity#<key>` - the full [`ShortLink`] as JSON
//! - `shortener:originalURL#<key>` - the destination URL only
//!
//! Cache entries are written after successful inserts and reads, and removed
//! after deletes. There is no transaction between cache and store, so a
//! cached entity may show a stale hit count, and a resolve racing a delete
//! may still see the URL, for at most one TTL.
//!
//! Cache failures are logged at `warn` and otherwise ignored; they never fail
//! an operation.

use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::entities::{LinkStats, NewShortLink, ShortLink};
use crate::domain::repositories::{RepositoryError, ShortLinkRepository};
use crate::error::ShortLinkError;
use crate::infrastructure::cache::CacheService;
use crate::utils::key_generator::KeyGenerator;
use crate::utils::url_validator::validate_original_url;

/// Upper bound on insert attempts per create.
pub const MAX_CREATE_ATTEMPTS: usize = 10;

/// Default lifetime of cache entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const CACHE_PREFIX: &str = "shortener";

/// Cache projections kept per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheNamespace {
    Entity,
    OriginalUrl,
}

impl CacheNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheNamespace::Entity => "entity",
            CacheNamespace::OriginalUrl => "originalURL",
        }
    }
}

/// Builds the cache key for a link key in a namespace.
pub fn cache_key(namespace: CacheNamespace, key: &str) -> String {
    format!("{}:{}#{}", CACHE_PREFIX, namespace.as_str(), key)
}

/// Builds the public redirect URL for a key.
pub fn short_url(base_url: &str, key: &str) -> String {
    format!(
        "{}/api/shortener/{}/redirect",
        base_url.trim_end_matches('/'),
        key
    )
}

/// Creates, resolves and deletes short links.
pub struct LinkStore {
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<dyn CacheService>,
    key_generator: Arc<dyn KeyGenerator>,
    base_url: String,
    cache_ttl: Duration,
}

impl LinkStore {
    /// Creates a link store with the default 24 hour cache TTL.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        cache: Arc<dyn CacheService>,
        key_generator: Arc<dyn KeyGenerator>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            key_generator,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Overrides the cache entry lifetime.
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Creates a short link for `original_url` under a fresh random key.
    ///
    /// Candidate keys are tried one after another; a key that already exists
    /// is logged and replaced by a new candidate. On success both cache
    /// projections are primed.
    ///
    /// # Errors
    ///
    /// - [`ShortLinkError::InvalidUrl`] before anything is written
    /// - [`ShortLinkError::CreationExhausted`] after [`MAX_CREATE_ATTEMPTS`] collisions
    /// - [`ShortLinkError::Store`] on any other store failure
    pub async fn create(&self, original_url: &str) -> Result<ShortLink, ShortLinkError> {
        validate_original_url(original_url)?;

        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let key = self.key_generator.generate();
            let new_link = NewShortLink {
                short_url: short_url(&self.base_url, &key),
                key,
                original_url: original_url.to_string(),
                // PostgreSQL keeps microseconds
                created_at: Utc::now().trunc_subsecs(6),
            };

            match self.repository.insert(&new_link).await {
                Ok(id) => {
                    let link = new_link.into_short_link(id);
                    self.cache_entity(&link).await;
                    self.cache_set(CacheNamespace::OriginalUrl, &link.key, &link.original_url)
                        .await;
                    debug!(key = %link.key, attempt, "Short link created");
                    return Ok(link);
                }
                Err(RepositoryError::KeyExists) => {
                    warn!(key = %new_link.key, attempt, "Link key already exists, retrying");
                }
                Err(e) => return Err(ShortLinkError::Store(e)),
            }
        }

        Err(ShortLinkError::CreationExhausted {
            attempts: MAX_CREATE_ATTEMPTS,
        })
    }

    /// Resolves a key to its destination URL and counts the hit.
    ///
    /// A failed hit increment is logged and does not affect the result.
    ///
    /// # Errors
    ///
    /// - [`ShortLinkError::NotFound`] if the key does not exist
    /// - [`ShortLinkError::Store`] if the store lookup fails
    pub async fn resolve(&self, key: &str) -> Result<String, ShortLinkError> {
        let original_url = match self.cache_get(CacheNamespace::OriginalUrl, key).await {
            Some(url) => url,
            None => {
                let url = self
                    .repository
                    .find_original_url_by_key(key)
                    .await
                    .map_err(|e| translate(e, key))?;
                self.cache_set(CacheNamespace::OriginalUrl, key, &url).await;
                url
            }
        };

        if let Err(e) = self.repository.increment_hits(key).await {
            warn!(key, error = %e, "Failed to increase link hits, continuing");
        }

        Ok(original_url)
    }

    /// Returns the full record for a key. Does not count a hit.
    ///
    /// # Errors
    ///
    /// - [`ShortLinkError::NotFound`] if the key does not exist
    /// - [`ShortLinkError::Store`] if the store lookup fails
    pub async fn expand(&self, key: &str) -> Result<ShortLink, ShortLinkError> {
        if let Some(json) = self.cache_get(CacheNamespace::Entity, key).await {
            match serde_json::from_str::<ShortLink>(&json) {
                Ok(link) => return Ok(link),
                Err(e) => warn!(key, error = %e, "Discarding undecodable cached entity"),
            }
        }

        let link = self
            .repository
            .find_by_key(key)
            .await
            .map_err(|e| translate(e, key))?;
        self.cache_entity(&link).await;

        Ok(link)
    }

    /// Deletes a key, then invalidates both cache projections.
    ///
    /// Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ShortLinkError::Store`] if the store delete fails; the cache
    /// is left untouched in that case.
    pub async fn delete(&self, key: &str) -> Result<(), ShortLinkError> {
        self.repository
            .delete_by_key(key)
            .await
            .map_err(ShortLinkError::Store)?;

        self.cache_delete(CacheNamespace::Entity, key).await;
        self.cache_delete(CacheNamespace::OriginalUrl, key).await;

        Ok(())
    }

    /// Reads the current hit count straight from the store.
    ///
    /// # Errors
    ///
    /// - [`ShortLinkError::NotFound`] if the key does not exist
    /// - [`ShortLinkError::Store`] if the store lookup fails
    pub async fn stats(&self, key: &str) -> Result<LinkStats, ShortLinkError> {
        self.repository
            .find_stats_by_key(key)
            .await
            .map_err(|e| translate(e, key))
    }

    async fn cache_entity(&self, link: &ShortLink) {
        match serde_json::to_string(link) {
            Ok(json) => self.cache_set(CacheNamespace::Entity, &link.key, &json).await,
            Err(e) => warn!(key = %link.key, error = %e, "Unable to serialize short link for cache"),
        }
    }

    async fn cache_get(&self, namespace: CacheNamespace, key: &str) -> Option<String> {
        match self.cache.get(&cache_key(namespace, key)).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, namespace = namespace.as_str(), error = %e, "Unable to read cache");
                None
            }
        }
    }

    async fn cache_set(&self, namespace: CacheNamespace, key: &str, value: &str) {
        if let Err(e) = self
            .cache
            .set(&cache_key(namespace, key), value, self.cache_ttl)
            .await
        {
            warn!(key, namespace = namespace.as_str(), error = %e, "Unable to write cache");
        }
    }

    async fn cache_delete(&self, namespace: CacheNamespace, key: &str) {
        if let Err(e) = self.cache.delete(&cache_key(namespace, key)).await {
            warn!(key, namespace = namespace.as_str(), error = %e, "Unable to invalidate cache");
        }
    }
}

/// Maps a store failure on a read path to the public taxonomy.
fn translate(err: RepositoryError, key: &str) -> ShortLinkError {
    match err {
        RepositoryError::NotFound => ShortLinkError::NotFound {
            key: key.to_string(),
        },
        other => ShortLinkError::Store(other),
    }
}
