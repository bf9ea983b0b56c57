//! Request dispatch and response validation
//!
//! `Dispatcher::send` is the only place that talks to the transport. It
//! builds the endpoint, serializes the request, invokes the transport once,
//! rejects non-2xx statuses and parses the envelope. It never retries and
//! never interprets result codes; retry policy lives in the token lifecycle
//! manager (`client`).

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use transport::{Transport, TransportRequest, TransportResponse};

use crate::constants::STANDARD_HEADERS;
use crate::error::{Error, Result};
use crate::messages::ApiResponse;

/// Stateless dispatcher bound to a transport and a base URL.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full endpoint URL for an API path with leading `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send `request` to `path` and parse the response envelope.
    ///
    /// Fails on transport rejection, non-2xx status, or a body that is not a
    /// valid envelope. Service-reported errors are returned as data.
    pub async fn send<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: ApiResponse,
    {
        let endpoint = self.endpoint(path);
        let body =
            serde_json::to_string(request).map_err(|e| Error::Serialization(e.to_string()))?;

        debug!(endpoint = %endpoint, "sending request");
        let response = self
            .transport
            .send(TransportRequest::post(endpoint, STANDARD_HEADERS, body))
            .await?;

        let response = validate_response(response)?;
        let parsed: Resp = response
            .json()
            .map_err(|e| Error::Protocol(format!("{path}: {e}")))?;

        let envelope = parsed.envelope();
        debug!(
            path,
            caller_id = envelope.caller_id,
            severity = %envelope.severity,
            result = envelope.result.0,
            "received response"
        );
        Ok(parsed)
    }
}

/// Reject non-2xx responses with the generic `InvalidApiCall` error.
///
/// The HTTP status and body are only logged; they never reach the caller.
pub fn validate_response(response: TransportResponse) -> Result<TransportResponse> {
    if response.is_success() {
        return Ok(response);
    }
    debug!(status = response.status, body = %response.text(), "API call rejected");
    Err(Error::InvalidApiCall)
}
