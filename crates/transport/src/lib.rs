//! Transport abstraction for Hero Lab Online API calls
//!
//! Defines the `Transport` trait that decouples request dispatch from the
//! HTTP stack. `ReqwestTransport` is the production adapter; tests swap in
//! deterministic doubles that synthesize canned responses without touching
//! the network.
//!
//! Requests and responses are plain data. The transport never interprets
//! status codes or bodies; validation belongs to the caller.

pub mod http;

pub use http::ReqwestTransport;

use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// HTTP method for a transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// An outbound request described as plain data.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    /// POST `body` to `url` with the given headers.
    pub fn post(url: impl Into<String>, headers: &[(&str, &str)], body: String) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            body: Some(body),
        }
    }

    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response described as plain data: status code plus the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Body decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}

/// Network-level failures. The request never produced an HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed future returned by [`Transport::send`].
pub type SendFuture<'a> = Pin<Box<dyn Future<Output = Result<TransportResponse>> + Send + 'a>>;

/// Pluggable HTTP capability used by the request dispatcher.
///
/// Uses a `Pin<Box<dyn Future>>` return type for dyn-compatibility
/// (`Arc<dyn Transport>`). Implementations resolve to `Ok` for every HTTP
/// response, including 4xx/5xx; `Err` is reserved for failures where no
/// response exists (connect errors, timeouts, truncated bodies).
pub trait Transport: Send + Sync {
    fn send(&self, request: TransportRequest) -> SendFuture<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_2xx_only() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(TransportResponse::new(299, "").is_success());
        assert!(!TransportResponse::new(199, "").is_success());
        assert!(!TransportResponse::new(301, "").is_success());
        assert!(!TransportResponse::new(400, "").is_success());
        assert!(!TransportResponse::new(500, "").is_success());
    }

    #[test]
    fn json_decodes_body() {
        let response = TransportResponse::new(200, r#"{"result":0,"severity":1}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["severity"], 1);
        assert_eq!(response.text(), r#"{"result":0,"severity":1}"#);
    }

    #[test]
    fn json_rejects_non_json_body() {
        let response = TransportResponse::new(200, "<html>gateway</html>");
        assert!(response.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn post_builds_request_with_headers() {
        let request = TransportRequest::post(
            "https://api.herolab.online/v1/access/verify-access-token",
            &[("Accept", "application/json")],
            "{}".into(),
        );
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("content-type"), None);
        assert_eq!(request.body.as_deref(), Some("{}"));
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        assert!(
            Error::Request("connection refused".into())
                .to_string()
                .contains("connection refused")
        );
        assert!(
            Error::Timeout(Duration::from_secs(30))
                .to_string()
                .contains("30s")
        );
    }
}
