//! BV-BRC Data API client
//!
//! Query the Bacterial and Viral Bioinformatics Resource Center collections
//! (`genome`, `genome_feature`, `taxonomy`, ...) with RQL filters and get the
//! rows back as JSON.
//!
//! # Overview
//!
//! - [`rql`]: pure builders for `eq`, `and`, `in`, `select`, `limit`, ...
//! - [`api`]: the executor that POSTs one RQL body per call
//! - [`Resource`]: the catalog of known collections
//! - [`BvbrcClient`] / [`ResourceClient`]: one handle per collection sharing
//!   one configured context
//! - [`config`]: endpoint, headers and token resolution
//!
//! # Example
//!
//! ```no_run
//! use bvbrc_client::{create_client, ClientOverrides, QueryOptions};
//!
//! # async fn demo() -> bvbrc_client::Result<()> {
//! let client = create_client(ClientOverrides::new())?;
//! let options = QueryOptions::new()
//!     .select(["feature_id", "product"])
//!     .limit(10);
//!
//! let rows = client
//!     .genome_feature()
//!     .query_by([("genome_id", "83332.12"), ("feature_type", "CDS")], &options)
//!     .await?;
//! println!("{}", rows);
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod rql;

pub use api::{ApiClient, PreparedRequest, QueryOptions};
pub use client::{create_client, BvbrcClient, ResourceClient};
pub use config::{ClientConfig, ClientOverrides, ConfigFile};
pub use error::{BvbrcError, Result};
pub use resources::Resource;
pub use rql::{Comparison, FieldFilter};
