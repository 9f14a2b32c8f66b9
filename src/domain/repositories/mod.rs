//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; the implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests.
//!
//! See `tests/repository_short_link.rs` for usage against PostgreSQL.

pub mod short_link_repository;

pub use short_link_repository::{RepositoryError, ShortLinkRepository};

#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
