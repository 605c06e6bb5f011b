// src/envelope.rs
//! Uniform success/error envelope returned by every backend operation.
//!
//! Serialized shape:
//! `{ "success": bool, "data"?: ..., "error"?: { message, status?, details? }, "timestamp": RFC 3339 }`
//! Exactly one of `data`/`error` is present. Envelopes are created fresh per
//! call and never shared across requests.

use chrono::{SecondsFormat, Utc};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::query::ValidationError;

/// Replacement for `details` outside development environments.
const GENERIC_DETAILS: &str = "An error occurred";

/// Which failure class produced a `Failure` envelope. Not serialized;
/// handlers use it to pick the transport status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    UpstreamStatus,
    Unreachable,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Envelope {
    Success {
        data: Value,
        timestamp: String,
    },
    Failure {
        kind: FailureKind,
        error: ErrorBody,
        timestamp: String,
    },
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self::Success {
            data,
            timestamp: now_iso(),
        }
    }

    pub fn from_fetch_error(err: &FetchError) -> Self {
        let kind = match err {
            FetchError::UpstreamStatus { .. } => FailureKind::UpstreamStatus,
            FetchError::Unreachable { .. } => FailureKind::Unreachable,
            FetchError::Internal { .. } => FailureKind::Internal,
        };
        Self::Failure {
            kind,
            error: ErrorBody {
                message: err.to_string(),
                status: err.status(),
                details: Some(err.details()),
            },
            timestamp: now_iso(),
        }
    }

    pub fn invalid(err: &ValidationError) -> Self {
        Self::Failure {
            kind: FailureKind::Validation,
            error: ErrorBody {
                message: err.to_string(),
                status: None,
                details: None,
            },
            timestamp: now_iso(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// `None` for success envelopes.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Swap diagnostic details for a generic sentence. Called by handlers
    /// outside development environments.
    pub fn redact_details(&mut self) {
        if let Self::Failure { error, .. } = self {
            if error.details.is_some() {
                error.details = Some(GENERIC_DETAILS.to_string());
            }
        }
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Envelope", 3)?;
        match self {
            Self::Success { data, timestamp } => {
                s.serialize_field("success", &true)?;
                s.serialize_field("data", data)?;
                s.serialize_field("timestamp", timestamp)?;
            }
            Self::Failure {
                error, timestamp, ..
            } => {
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.serialize_field("timestamp", timestamp)?;
            }
        }
        s.end()
    }
}

/// Fresh RFC 3339 UTC timestamp.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
