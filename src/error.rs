// src/error.rs
//! Failure classification for upstream calls.
//!
//! Every outbound call ends in exactly one of three classes, carried as data
//! so handlers can map each class to a distinct transport status:
//! upstream rejected the request, upstream never answered, or we failed to
//! process an otherwise good response.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Upstream answered with a non-2xx status.
    #[error("API request failed")]
    UpstreamStatus { status: u16, body: String },

    /// The request went out but no response came back (connect failure or
    /// timeout).
    #[error("No response from upstream")]
    Unreachable { cause: String },

    /// A response arrived but processing it failed (malformed payload, or
    /// anything else unexpected).
    #[error("Failed to fetch data")]
    Internal { cause: String },
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic text for the envelope `details` field. Always populated
    /// here; redaction for non-development environments is a handler concern.
    pub fn details(&self) -> String {
        match self {
            Self::UpstreamStatus { status, body } => {
                if body.trim().is_empty() {
                    format!("upstream returned status {status}")
                } else {
                    body.clone()
                }
            }
            Self::Unreachable { .. } => {
                "The request was made but no response was received".to_string()
            }
            Self::Internal { cause } => cause.clone(),
        }
    }

    /// Classify a transport-level `reqwest` error from `send()`.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Internal {
                cause: err.to_string(),
            }
        } else {
            Self::Unreachable {
                cause: err.to_string(),
            }
        }
    }

    /// Classify a `reqwest` error raised while reading/decoding a 2xx body.
    pub(crate) fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Unreachable {
                cause: err.to_string(),
            }
        } else {
            Self::Internal {
                cause: err.to_string(),
            }
        }
    }
}
