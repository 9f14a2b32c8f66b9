//! Core domain entities representing the business data model.
//!
//! - [`ShortLink`] - A stored URL mapping with its hit counter
//! - [`NewShortLink`] - Data for inserting a new mapping
//! - [`LinkStats`] - Hit counter projection used by the stats query

pub mod short_link;

pub use short_link::{LinkStats, NewShortLink, ShortLink};
