//! HTTP layer
//!
//! Request assembly and execution against the BV-BRC Data API.

pub mod client;
pub mod endpoints;
pub mod options;
pub mod types;

pub use client::{ApiClient, PreparedRequest};
pub use options::QueryOptions;
pub use types::*;
