//! Production transport backed by `reqwest`.
//!
//! Every HTTP response, including error statuses, is returned as data so the
//! dispatcher can apply its own validation. Only connect failures, timeouts
//! and unreadable bodies surface as `Err`.

use std::time::Duration;

use tracing::debug;

use crate::{Error, Method, SendFuture, Transport, TransportRequest, TransportResponse};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `Transport` implementation using a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), timeout)
    }

    /// Reuse an existing client (and its connection settings).
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> SendFuture<'_> {
        Box::pin(async move {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
            };

            let mut builder = self
                .client
                .request(method, &request.url)
                .timeout(self.timeout);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.timeout)
                } else {
                    Error::Request(e.to_string())
                }
            })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.timeout)
                } else {
                    Error::Body(e.to_string())
                }
            })?;

            debug!(url = %request.url, status, bytes = body.len(), "transport response");
            Ok(TransportResponse { status, body })
        })
    }
}
