//! Client configuration
//!
//! A [`ClientConfig`] is resolved once and handed to the client by value.
//! Layers, later ones winning:
//!
//! 1. built-in defaults (public BV-BRC endpoint, anonymous)
//! 2. `config.json` in the working directory, when present and readable
//! 3. `BVBRC_API_URL` / `BVBRC_AUTH_TOKEN` environment variables
//! 4. explicit [`ClientOverrides`]

use crate::error::{BvbrcError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Public BV-BRC Data API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.bv-brc.org/api";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

pub const ENV_API_URL: &str = "BVBRC_API_URL";
pub const ENV_AUTH_TOKEN: &str = "BVBRC_AUTH_TOKEN";

/// On-disk `config.json` contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ConfigFile {
    /// Read and parse a config file, failing on any error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`ConfigFile::load`], but a missing, unreadable or malformed
    /// file yields `None`.
    pub fn load_optional(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(file) => Some(file),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "Ignoring config file");
                None
            },
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), format!("{}\n", json))?;
        Ok(())
    }
}

/// Caller-supplied values applied on top of file and environment settings
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    pub headers: Vec<(String, String)>,
    /// Config file to read instead of `./config.json`
    pub config_path: Option<PathBuf>,
}

impl ClientOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }
}

/// Resolved connection context shared by every resource handle of a client
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    headers: BTreeMap<String, String>,
    auth_token: Option<String>,
}

impl ClientConfig {
    /// Config for `base_url` with no extra headers and no token.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref())?,
            headers: BTreeMap::new(),
            auth_token: None,
        })
    }

    /// Resolve defaults, config file, environment and `overrides`, in that order.
    pub fn resolve(overrides: ClientOverrides) -> Result<Self> {
        let path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let file = ConfigFile::load_optional(&path).unwrap_or_default();

        let mut base_url = file.base_url;
        let mut auth_token = file.auth_token;

        if let Some(url) = non_empty_env(ENV_API_URL) {
            base_url = Some(url);
        }
        if let Some(token) = non_empty_env(ENV_AUTH_TOKEN) {
            auth_token = Some(token);
        }

        if overrides.base_url.is_some() {
            base_url = overrides.base_url;
        }
        if overrides.auth_token.is_some() {
            auth_token = overrides.auth_token;
        }

        let mut config = Self::new(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        config.auth_token = auth_token.filter(|t| !t.trim().is_empty());
        for (name, value) in overrides.headers {
            config.headers.insert(name, value);
        }

        debug!(
            base_url = %config.base_url,
            authenticated = config.auth_token.is_some(),
            "Resolved client configuration"
        );

        Ok(config)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Whether the caller already set an `Authorization` header.
    pub fn has_authorization_header(&self) -> bool {
        self.headers
            .keys()
            .any(|name| name.eq_ignore_ascii_case("authorization"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: BTreeMap::new(),
            auth_token: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| BvbrcError::config(format!("Invalid base URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BvbrcError::config(format!(
            "Base URL '{}' must use http or https",
            raw
        )));
    }

    Ok(trimmed.to_string())
}
