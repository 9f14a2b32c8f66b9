//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{LinkStats, NewShortLink, ShortLink};
use crate::domain::repositories::{RepositoryError, ShortLinkRepository};
use crate::utils::db_error::is_unique_violation_on_key;

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    link_key: String,
    original_url: String,
    short_url: String,
    hits: i64,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.id,
            row.link_key,
            row.original_url,
            row.short_url,
            hits_from_db(row.hits),
            row.created_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    hits: i64,
    created_at: DateTime<Utc>,
}

/// The column carries `CHECK (hits >= 0)`.
fn hits_from_db(hits: i64) -> u64 {
    u64::try_from(hits).unwrap_or_default()
}

/// PostgreSQL repository for short links.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn insert(&self, new_link: &NewShortLink) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO short_links (link_key, original_url, short_url, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new_link.key)
        .bind(&new_link.original_url)
        .bind(&new_link.short_url)
        .bind(new_link.created_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_key(&e) {
                RepositoryError::KeyExists
            } else {
                RepositoryError::Database(e)
            }
        })
    }

    async fn find_by_key(&self, key: &str) -> Result<ShortLink, RepositoryError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, link_key, original_url, short_url, hits, created_at
            FROM short_links
            WHERE link_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortLink::from).ok_or(RepositoryError::NotFound)
    }

    async fn find_original_url_by_key(&self, key: &str) -> Result<String, RepositoryError> {
        sqlx::query_scalar::<_, String>("SELECT original_url FROM short_links WHERE link_key = $1")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_by_key(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM short_links WHERE link_key = $1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn increment_hits(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE short_links SET hits = hits + 1 WHERE link_key = $1")
            .bind(key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_stats_by_key(&self, key: &str) -> Result<LinkStats, RepositoryError> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT hits, created_at FROM short_links WHERE link_key = $1",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(LinkStats {
            hits: hits_from_db(row.hits),
            created_at: row.created_at,
        })
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
