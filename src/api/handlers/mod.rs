//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod delete;
pub mod expand;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use delete::delete_handler;
pub use expand::expand_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
