//! Configuration management for the bvbrc CLI
//!
//! Global flags map onto [`ClientOverrides`]; the config file itself is
//! read and written through [`ConfigFile`].

use crate::error::{CliError, Result};
use crate::Cli;
use bvbrc_client::config::DEFAULT_BASE_URL;
use bvbrc_client::{create_client, BvbrcClient, ClientConfig, ClientOverrides, ConfigFile};
use std::path::{Path, PathBuf};

/// Keys accepted by `bvbrc config get/set/unset`.
pub const CONFIG_KEYS: &[&str] = &["auth_token", "base_url"];

/// Settings shared by every subcommand
#[derive(Debug, Clone)]
pub struct CliContext {
    api_url: Option<String>,
    token: Option<String>,
    config_path: PathBuf,
}

impl CliContext {
    pub fn new(api_url: Option<String>, token: Option<String>, config_path: PathBuf) -> Self {
        Self {
            api_url,
            token,
            config_path,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.api_url.clone(), cli.token.clone(), cli.config.clone())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Flag values layered over the config file and environment.
    pub fn overrides(&self) -> ClientOverrides {
        let mut overrides = ClientOverrides::new().config_path(&self.config_path);
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            overrides = overrides.base_url(url);
        }
        if let Some(token) = self.token.as_deref().filter(|t| !t.trim().is_empty()) {
            overrides = overrides.auth_token(token);
        }
        overrides
    }

    pub fn resolve(&self) -> Result<ClientConfig> {
        Ok(ClientConfig::resolve(self.overrides())?)
    }

    pub fn client(&self) -> Result<BvbrcClient> {
        Ok(create_client(self.overrides())?)
    }

    /// The config file, or an empty one when it does not exist yet.
    pub fn load_file(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }
        ConfigFile::load(&self.config_path).map_err(|e| {
            CliError::config(format!(
                "Cannot read {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    pub fn save_file(&self, file: &ConfigFile) -> Result<()> {
        Ok(file.save(&self.config_path)?)
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new(None, None, PathBuf::from(bvbrc_client::config::DEFAULT_CONFIG_FILE))
    }
}

/// Value stored under `key`, rejecting unknown keys.
pub fn file_value<'a>(file: &'a ConfigFile, key: &str) -> Result<Option<&'a str>> {
    match key {
        "auth_token" => Ok(file.auth_token.as_deref()),
        "base_url" => Ok(file.base_url.as_deref()),
        _ => Err(unknown_key(key)),
    }
}

/// Store `value` under `key`; `None` removes it.
pub fn set_file_value(file: &mut ConfigFile, key: &str, value: Option<String>) -> Result<()> {
    match key {
        "auth_token" => file.auth_token = value,
        "base_url" => {
            if let Some(url) = value.as_deref() {
                // Same validation the client applies at startup
                ClientConfig::new(url)?;
            }
            file.base_url = value;
        },
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

/// Show only the head and tail of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn default_base_url() -> &'static str {
    DEFAULT_BASE_URL
}

fn unknown_key(key: &str) -> CliError {
    CliError::config(format!(
        "Unknown config key '{}'. Valid keys: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_skip_blank_flags() {
        let ctx = CliContext::new(Some("  ".to_string()), None, PathBuf::from("x.json"));
        let overrides = ctx.overrides();
        assert!(overrides.base_url.is_none());
        assert!(overrides.auth_token.is_none());
        assert_eq!(overrides.config_path, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_overrides_carry_flags() {
        let ctx = CliContext::new(
            Some("http://localhost:8080/api".to_string()),
            Some("tok".to_string()),
            PathBuf::from("config.json"),
        );
        let overrides = ctx.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://localhost:8080/api"));
        assert_eq!(overrides.auth_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let ctx = CliContext::new(None, None, dir.path().join("config.json"));
        assert_eq!(ctx.load_file().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_set_and_get_values() {
        let mut file = ConfigFile::default();
        set_file_value(&mut file, "auth_token", Some("abc".to_string())).unwrap();
        set_file_value(&mut file, "base_url", Some("http://localhost/api".to_string())).unwrap();
        assert_eq!(file_value(&file, "auth_token").unwrap(), Some("abc"));
        assert_eq!(file_value(&file, "base_url").unwrap(), Some("http://localhost/api"));

        set_file_value(&mut file, "auth_token", None).unwrap();
        assert_eq!(file_value(&file, "auth_token").unwrap(), None);
    }

    #[test]
    fn test_rejects_bad_keys_and_urls() {
        let mut file = ConfigFile::default();
        assert!(file_value(&file, "cache_dir").is_err());
        assert!(set_file_value(&mut file, "verbose", Some("1".to_string())).is_err());
        assert!(set_file_value(&mut file, "base_url", Some("nope".to_string())).is_err());
        assert!(file.base_url.is_none());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("un=alice|tokenid=abcdef"), "un=a...cdef");
    }
}
