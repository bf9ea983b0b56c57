//! Error types for Hero Lab Online API operations
//!
//! Service-reported failures normally travel as data inside the response
//! envelope. `Error` covers the cases where no meaningful envelope exists:
//! transport failures, non-2xx statuses, unparseable bodies, a missing token
//! in manual mode, and a token acquisition that the client itself needed.

use std::path::PathBuf;

use crate::codes::{ResultCode, Severity};
use crate::messages::ResponseEnvelope;

/// Errors from API client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport produced no response at all.
    #[error("transport error: {0}")]
    Transport(#[from] transport::Error),

    /// Non-2xx HTTP status. Transport detail is not carried.
    #[error("Invalid API call")]
    InvalidApiCall,

    /// Body was not JSON or lacked required envelope fields.
    #[error("invalid API response: {0}")]
    Protocol(String),

    #[error("failed to encode request: {0}")]
    Serialization(String),

    /// Manual token handling with no access token available. Raised before
    /// any network call.
    #[error("No access token defined and automatic token handling switched off")]
    TokenRequired { caller_id: i64 },

    /// A token acquisition the client depended on was refused by the service.
    #[error("{message} (severity {severity}, result {result})")]
    Service {
        caller_id: i64,
        severity: Severity,
        result: ResultCode,
        message: String,
    },

    /// Reading or writing a token file failed.
    #[error("token storage error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build a `Service` error from a refused envelope.
    pub fn from_envelope(envelope: &ResponseEnvelope) -> Self {
        Error::Service {
            caller_id: envelope.caller_id,
            severity: envelope.severity,
            result: envelope.result,
            message: envelope
                .error
                .clone()
                .unwrap_or_else(|| "access token could not be acquired".into()),
        }
    }

    /// Severity in the service's taxonomy. Local failures report `Error`.
    pub fn severity(&self) -> Severity {
        match self {
            Error::Service { severity, .. } => *severity,
            _ => Severity::Error,
        }
    }

    /// Result code in the service's taxonomy. A missing token reports
    /// `BAD_API_TOKEN` so callers see the same code in manual and automatic
    /// mode; other local failures report 0.
    pub fn result(&self) -> ResultCode {
        match self {
            Error::Service { result, .. } => *result,
            Error::TokenRequired { .. } => ResultCode::BAD_API_TOKEN,
            _ => ResultCode::SUCCESS,
        }
    }
}

/// Result alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;
