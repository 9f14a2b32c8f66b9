//! Infrastructure layer: the concrete store and cache behind the link store.
//!
//! - [`cache`] - [`cache::CacheService`] with Redis and no-op backends
//! - [`persistence`] - PostgreSQL implementation of the short link repository

pub mod cache;
pub mod persistence;
