//! Per-request query options

use crate::error::{BvbrcError, Result};
use crate::rql;
use serde::{Deserialize, Serialize};

/// Row cap applied when the caller does not set one.
pub const DEFAULT_LIMIT: u64 = 1000;

/// Projection, ordering and size of one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Fields to return; empty means every stored field
    #[serde(default)]
    pub select: Vec<String>,

    /// Sort expression such as `+genome_name` or `-collection_year`
    #[serde(default)]
    pub sort: Option<String>,

    /// Maximum rows; [`DEFAULT_LIMIT`] when unset
    #[serde(default)]
    pub limit: Option<u64>,

    /// Ask the service for a bulk download (requires `sort`)
    #[serde(default)]
    pub http_download: bool,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort(mut self, expr: impl Into<String>) -> Self {
        self.sort = Some(expr.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn http_download(mut self, enabled: bool) -> Self {
        self.http_download = enabled;
        self
    }

    pub fn effective_limit(&self) -> u64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    fn has_sort(&self) -> bool {
        self.sort.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Check local preconditions before anything is sent.
    pub fn validate(&self, resource: &str) -> Result<()> {
        if self.http_download && !self.has_sort() {
            return Err(BvbrcError::sort_required(resource));
        }
        Ok(())
    }

    /// Request body: filter, select, sort, limit and download flag joined by `&`.
    pub fn build_body(&self, filter: &str) -> String {
        let download = if self.http_download {
            "http_download=true".to_string()
        } else {
            String::new()
        };

        [
            filter.to_string(),
            rql::select(&self.select),
            rql::sort(self.sort.as_deref().unwrap_or_default()),
            rql::limit(self.effective_limit()),
            download,
        ]
        .into_iter()
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join("&")
    }
}
