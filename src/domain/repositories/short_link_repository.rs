//! Repository trait for short link persistence.

use crate::domain::entities::{LinkStats, NewShortLink, ShortLink};
use async_trait::async_trait;

/// Store-level failures.
///
/// These never leave the application layer: [`crate::application::services::LinkStore`]
/// translates them into [`crate::error::ShortLinkError`].
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("short link key already exists")]
    KeyExists,

    #[error("short link not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Authoritative storage for short links.
///
/// Records are keyed by `key`, which carries a uniqueness constraint.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new link and returns the id assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::KeyExists`] if the key is already taken.
    /// Returns [`RepositoryError::Database`] on any other failure.
    async fn insert(&self, new_link: &NewShortLink) -> Result<i64, RepositoryError>;

    /// Fetches the full record for a key.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no record has this key.
    async fn find_by_key(&self, key: &str) -> Result<ShortLink, RepositoryError>;

    /// Fetches only the destination URL for a key.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no record has this key.
    async fn find_original_url_by_key(&self, key: &str) -> Result<String, RepositoryError>;

    /// Deletes the record for a key. Succeeds when nothing matched.
    async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError>;

    /// Atomically increments the hit counter of a key.
    async fn increment_hits(&self, key: &str) -> Result<(), RepositoryError>;

    /// Fetches the hit counter and creation time of a key.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no record has this key.
    async fn find_stats_by_key(&self, key: &str) -> Result<LinkStats, RepositoryError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
