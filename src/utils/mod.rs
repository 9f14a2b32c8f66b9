//! Helpers shared across layers.
//!
//! - [`key_generator`] - Random key generation and key shape checks
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - PostgreSQL error classification

pub mod db_error;
pub mod key_generator;
pub mod url_validator;
