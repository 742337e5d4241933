//! Error types for the bvbrc CLI
//!
//! User-facing errors with a hint on how to fix the problem.

use bvbrc_client::BvbrcError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// The Data API rejected the request with an auth status
    #[error("{0}. Check your token with 'bvbrc config show' or pass --token.")]
    Unauthorized(BvbrcError),

    /// Any other client failure
    #[error(transparent)]
    Client(BvbrcError),

    #[error("Unknown resource '{name}'.{hint} Run 'bvbrc resources' to list collections.")]
    UnknownResource { name: String, hint: String },

    /// A flag value could not be understood
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}. Check the config file or the BVBRC_* environment variables.")]
    Config(String),

    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    #[error("Failed to format JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<BvbrcError> for CliError {
    fn from(err: BvbrcError) -> Self {
        match err.status() {
            Some(401) | Some(403) => Self::Unauthorized(err),
            _ => Self::Client(err),
        }
    }
}

impl CliError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unknown_resource(name: impl Into<String>, suggestion: Option<&str>) -> Self {
        Self::UnknownResource {
            name: name.into(),
            hint: suggestion
                .map(|s| format!(" Did you mean '{}'?", s))
                .unwrap_or_default(),
        }
    }
}
