//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! - [`PgShortLinkRepository`] - Short link storage, lookups and hit counting

pub mod pg_short_link_repository;

pub use pg_short_link_repository::PgShortLinkRepository;
