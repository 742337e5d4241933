//! Request executor
//!
//! One POST per call: validate options, assemble the RQL body, send, check the
//! status, decode JSON. No retries, no pagination, no timeout beyond the HTTP
//! client's defaults.

use crate::api::{endpoints, options::QueryOptions};
use crate::config::ClientConfig;
use crate::error::{BvbrcError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Content type the Data API expects for RQL request bodies.
pub const RQL_CONTENT_TYPE: &str = "application/rqlquery+x-www-form-urlencoded";

/// A fully assembled request, before it is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub url: String,
    pub body: String,
}

/// Executes RQL queries against one configured endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    headers: HeaderMap,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let headers = request_headers(&config)?;
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            config,
            headers,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Validate and assemble a request without sending it.
    pub fn prepare(
        &self,
        resource: &str,
        filter: &str,
        options: &QueryOptions,
    ) -> Result<PreparedRequest> {
        options.validate(resource)?;

        Ok(PreparedRequest {
            url: endpoints::resource_url(self.config.base_url(), resource),
            body: options.build_body(filter),
        })
    }

    /// Run one query and return the decoded JSON body.
    #[instrument(skip_all, fields(resource = %resource))]
    pub async fn run(&self, resource: &str, filter: &str, options: &QueryOptions) -> Result<Value> {
        let request = self.prepare(resource, filter, options)?;
        debug!(url = %request.url, body = %request.body, "Sending RQL query");

        let response = self
            .client
            .post(&request.url)
            .headers(self.headers.clone())
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "BV-BRC returned an error status");
            return Err(BvbrcError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                resource: resource.to_string(),
            });
        }

        let body: Value = response.json().await?;
        debug!(rows = row_count(&body), "Query completed");
        Ok(body)
    }

    /// [`ApiClient::run`], decoding into `T`.
    pub async fn run_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        filter: &str,
        options: &QueryOptions,
    ) -> Result<T> {
        let value = self.run(resource, filter, options).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn row_count(body: &Value) -> usize {
    match body {
        Value::Array(rows) => rows.len(),
        Value::Null => 0,
        _ => 1,
    }
}

/// Fixed headers plus caller headers; the token fills `Authorization` only
/// when the caller did not set one.
fn request_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(RQL_CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in config.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| BvbrcError::config(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            BvbrcError::config(format!("Invalid value for header '{}': {}", name, e))
        })?;
        headers.insert(name, value);
    }

    if let Some(token) = config.auth_token() {
        if !config.has_authorization_header() {
            let mut value = HeaderValue::from_str(token)
                .map_err(|e| BvbrcError::config(format!("Invalid auth token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
    }

    Ok(headers)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_builds_url_and_body() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let request = client
            .prepare("genome", "eq(genome_id,83332.12)", &QueryOptions::new().limit(1))
            .unwrap();

        assert_eq!(request.url, "https://www.bv-brc.org/api/genome/");
        assert_eq!(request.body, "eq(genome_id,83332.12)&limit(1)");
    }

    #[test]
    fn test_prepare_rejects_download_without_sort() {
        let client = ApiClient::new(ClientConfig::default()).unwrap();
        let result = client.prepare("genome", "", &QueryOptions::new().http_download(true));
        assert!(matches!(result, Err(BvbrcError::SortRequired { .. })));
    }

    #[test]
    fn test_token_fills_authorization() {
        let config = ClientConfig::default().with_auth_token("un=alice|tokenid=1");
        let headers = request_headers(&config).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "un=alice|tokenid=1");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), RQL_CONTENT_TYPE);
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_explicit_authorization_wins() {
        let config = ClientConfig::default()
            .with_header("authorization", "caller-token")
            .with_auth_token("config-token");
        let headers = request_headers(&config).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "caller-token");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_invalid_header_name() {
        let config = ClientConfig::default().with_header("bad header", "x");
        assert!(matches!(ApiClient::new(config), Err(BvbrcError::Config(_))));
    }

    #[test]
    fn test_row_count() {
        assert_eq!(row_count(&serde_json::json!([1, 2, 3])), 3);
        assert_eq!(row_count(&serde_json::json!({"genome_id": "1"})), 1);
        assert_eq!(row_count(&Value::Null), 0);
    }
}
