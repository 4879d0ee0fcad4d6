//! REST Client Error Types
//!
//! Transport-level failures for store requests. A business rejection -
//! HTTP 200 with `success: false` - is *not* an `ApiError`;
//! the service layer turns those into `CategoryServiceError::Rejected` so
//! the verbatim server message survives to the UI.

use thiserror::Error;

/// Transport and decoding failures for store requests
#[derive(Error, Debug)]
pub enum ApiError {
    /// Network-level failure (connection refused, DNS, TLS, ...)
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The bounded request timeout expired
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Server answered with a non-success HTTP status
    #[error("Server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Response body did not match the endpoint schema
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Classify a reqwest send error, separating timeouts from transport.
    pub fn from_send(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Transport { url, source }
        }
    }

    /// Create a status error
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create a decode error
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }
}
