//! Client factory and per-resource handles
//!
//! A [`BvbrcClient`] owns one resolved context; every [`ResourceClient`] it
//! hands out shares that context and the underlying connection pool. The
//! handle methods only differ in the filter they build before calling the
//! executor.

use crate::api::{ApiClient, PreparedRequest, QueryOptions};
use crate::config::{ClientConfig, ClientOverrides};
use crate::error::Result;
use crate::resources::Resource;
use crate::rql::{self, FieldFilter};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

/// Resolve configuration (file, environment, `overrides`) and build a client.
pub fn create_client(overrides: ClientOverrides) -> Result<BvbrcClient> {
    BvbrcClient::new(ClientConfig::resolve(overrides)?)
}

/// Entry point bundling every known collection behind one context
#[derive(Debug, Clone)]
pub struct BvbrcClient {
    api: Arc<ApiClient>,
}

impl BvbrcClient {
    /// Build from an explicit configuration; reads neither files nor env.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            api: Arc::new(ApiClient::new(config)?),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn resource(&self, resource: Resource) -> ResourceClient {
        ResourceClient {
            api: Arc::clone(&self.api),
            resource,
        }
    }

    /// Handle for a collection given by name, e.g. `"genome_feature"`.
    pub fn resource_named(&self, name: &str) -> Result<ResourceClient> {
        Ok(self.resource(name.parse()?))
    }

    /// One handle per known collection, keyed by collection name.
    pub fn resources(&self) -> BTreeMap<&'static str, ResourceClient> {
        Resource::ALL
            .iter()
            .map(|&resource| (resource.name(), self.resource(resource)))
            .collect()
    }
}

/// One collection bound to a client context
#[derive(Debug, Clone)]
pub struct ResourceClient {
    api: Arc<ApiClient>,
    resource: Resource,
}

impl ResourceClient {
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn name(&self) -> &'static str {
        self.resource.name()
    }

    /// Assemble the request for `filter` without sending it.
    pub fn prepare(&self, filter: &str, options: &QueryOptions) -> Result<PreparedRequest> {
        self.api.prepare(self.name(), filter, options)
    }

    /// Send an already built filter.
    pub async fn run(&self, filter: &str, options: &QueryOptions) -> Result<Value> {
        self.api.run(self.name(), filter, options).await
    }

    pub async fn run_as<T: DeserializeOwned>(
        &self,
        filter: &str,
        options: &QueryOptions,
    ) -> Result<T> {
        self.api.run_as(self.name(), filter, options).await
    }

    /// Rows whose primary key equals `id`.
    pub async fn get_by_id(&self, id: impl Display, options: &QueryOptions) -> Result<Value> {
        self.run(&rql::eq(self.resource.primary_key(), id), options)
            .await
    }

    pub async fn get_by_id_as<T: DeserializeOwned>(
        &self,
        id: impl Display,
        options: &QueryOptions,
    ) -> Result<T> {
        self.run_as(&rql::eq(self.resource.primary_key(), id), options)
            .await
    }

    /// Rows matching every `field = value` pair.
    pub async fn query_by<I, K, V>(&self, filters: I, options: &QueryOptions) -> Result<Value>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        self.run(&rql::build_and_from(filters), options).await
    }

    pub async fn query_by_as<T, I, K, V>(&self, filters: I, options: &QueryOptions) -> Result<T>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        self.run_as(&rql::build_and_from(filters), options).await
    }

    /// Rows matching every filter, each with its own comparison.
    pub async fn query_where(
        &self,
        filters: &[FieldFilter],
        options: &QueryOptions,
    ) -> Result<Value> {
        self.run(&rql::filters_to_rql(filters), options).await
    }

    /// Unfiltered rows, capped by the options' limit.
    pub async fn get_all(&self, options: &QueryOptions) -> Result<Value> {
        self.run("", options).await
    }

    pub async fn get_all_as<T: DeserializeOwned>(&self, options: &QueryOptions) -> Result<T> {
        self.run_as("", options).await
    }

    /// Full-text match across the collection's indexed fields.
    pub async fn search_by_keyword(
        &self,
        keyword: impl Display,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.run(&rql::keyword(keyword), options).await
    }

    /// Rows where `field` equals `value`.
    pub async fn get_by(
        &self,
        field: &str,
        value: impl Display,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.run(&rql::eq(field, value), options).await
    }

    /// Rows where `field` equals any of `values`.
    pub async fn get_by_any<I, V>(
        &self,
        field: &str,
        values: I,
        options: &QueryOptions,
    ) -> Result<Value>
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.run(&rql::in_(field, values), options).await
    }

    /// Rows with `min < field < max`.
    pub async fn get_by_range(
        &self,
        field: &str,
        min: impl Display,
        max: impl Display,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.run(&range_filter(field, min, max, false), options)
            .await
    }

    /// Rows with `min <= field <= max`.
    pub async fn get_by_range_inclusive(
        &self,
        field: &str,
        min: impl Display,
        max: impl Display,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.run(&range_filter(field, min, max, true), options)
            .await
    }

    /// Rows whose date `field` falls on or between `from` and `to`.
    pub async fn get_by_date_range(
        &self,
        field: &str,
        from: NaiveDate,
        to: NaiveDate,
        options: &QueryOptions,
    ) -> Result<Value> {
        self.run(&date_range_filter(field, from, to), options)
            .await
    }
}

pub(crate) fn range_filter(
    field: &str,
    min: impl Display,
    max: impl Display,
    inclusive: bool,
) -> String {
    if inclusive {
        rql::and([rql::ge(field, min), rql::le(field, max)])
    } else {
        rql::and([rql::gt(field, min), rql::lt(field, max)])
    }
}

pub(crate) fn date_range_filter(field: &str, from: NaiveDate, to: NaiveDate) -> String {
    let day = |d: NaiveDate| format!("{}T00:00:00Z", d.format("%Y-%m-%d"));
    range_filter(field, day(from), day(to), true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn client() -> BvbrcClient {
        BvbrcClient::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_resources_cover_catalog() {
        let resources = client().resources();
        let names: Vec<&str> = resources.keys().copied().collect();
        let expected: Vec<&str> = Resource::names().collect();
        assert_eq!(names, expected);

        for (name, handle) in &resources {
            assert_eq!(handle.name(), *name);
        }
    }

    #[test]
    fn test_generated_accessors() {
        let client = client();
        assert_eq!(client.genome().resource(), Resource::Genome);
        assert_eq!(client.genome_feature().name(), "genome_feature");
        assert_eq!(client.sp_gene().name(), "sp_gene");
        assert_eq!(client.taxonomy().resource().primary_key(), "taxon_id");
    }

    #[test]
    fn test_resource_named() {
        let client = client();
        assert_eq!(client.resource_named("surveillance").unwrap().name(), "surveillance");
        assert!(client.resource_named("nope").is_err());
    }

    #[test]
    fn test_range_filters() {
        assert_eq!(
            range_filter("genome_length", 1000, 5000, false),
            "and(gt(genome_length,1000),lt(genome_length,5000))"
        );
        assert_eq!(
            range_filter("gc_content", 40, 60, true),
            "and(ge(gc_content,40),le(gc_content,60))"
        );
    }

    #[test]
    fn test_date_range_filter() {
        let from = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        assert_eq!(
            date_range_filter("date_inserted", from, to),
            "and(ge(date_inserted,2020-01-01T00%3A00%3A00Z),le(date_inserted,2020-12-31T00%3A00%3A00Z))"
        );
    }

    #[test]
    fn test_prepare_uses_collection_path() {
        let request = client()
            .genome_feature()
            .prepare(&rql::eq("genome_id", "83332.12"), &QueryOptions::new())
            .unwrap();
        assert_eq!(request.url, "https://www.bv-brc.org/api/genome_feature/");
        assert_eq!(request.body, "eq(genome_id,83332.12)&limit(1000)");
    }
}
