//! Error types for the BV-BRC client
//!
//! Two failure kinds originate in this crate: a request that breaks a local
//! precondition, and a non-success HTTP status relayed from the service.
//! Everything else (DNS, TLS, malformed JSON) is wrapped without rewording.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, BvbrcError>;

#[derive(Error, Debug)]
pub enum BvbrcError {
    /// Bulk downloads need a deterministic order
    #[error("http_download on '{resource}' requires a sort clause (e.g. sort(+{resource}_id))")]
    SortRequired { resource: String },

    /// The service answered with a non-success status.
    ///
    /// `status_text` is the standard reason phrase for `status`, not the
    /// phrase the server sent; it is empty for non-standard codes.
    #[error("BV-BRC request to '{resource}' failed: HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        resource: String,
    },

    /// Network or body-read failure reported by the HTTP client
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Response body could not be decoded into the requested type
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Unknown BV-BRC resource '{0}'")]
    UnknownResource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BvbrcError {
    pub fn sort_required(resource: impl Into<String>) -> Self {
        Self::SortRequired {
            resource: resource.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of a relayed error, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_http_status(&self, code: u16) -> bool {
        self.status() == Some(code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_contains_status() {
        let err = BvbrcError::Http {
            status: 404,
            status_text: "Not Found".to_string(),
            resource: "genome".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Not Found"));
        assert!(msg.contains("genome"));
        assert!(err.is_http_status(404));
        assert!(!err.is_http_status(500));
    }

    #[test]
    fn test_sort_required_message() {
        let err = BvbrcError::sort_required("genome_feature");
        assert!(err.to_string().contains("requires a sort clause"));
        assert_eq!(err.status(), None);
    }
}
