//! HTTP seam for provider calls.
//!
//! Providers build an [`HttpRequest`] and hand it to a [`Transport`].
//! The real transport (`ureq`) sits behind the `http` feature; without
//! it every call fails with `TransportUnavailable`.  Tests inject their
//! own transport and never touch the network.

use std::sync::Arc;
use std::time::Duration;

use crate::errors::{ByoaiError, Result};

/// Default timeout for provider requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A JSON POST request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

/// The parts of a response providers look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests. Non-2xx statuses are returned, not raised.
pub trait Transport: Send + Sync {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Placeholder used when no HTTP client is compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTransport;

impl Transport for UnavailableTransport {
    fn post_json(&self, _request: &HttpRequest) -> Result<HttpResponse> {
        Err(ByoaiError::TransportUnavailable)
    }
}

/// `ureq`-backed transport with a global per-request timeout.
#[cfg(feature = "http")]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "http")]
impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

#[cfg(feature = "http")]
impl Transport for UreqTransport {
    fn post_json(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.agent.post(request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .send_json(&request.body)
            .map_err(|e| ByoaiError::ProviderRequest(e.to_string()))?;

        let status = response.status();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ByoaiError::ProviderRequest(format!("reading response: {e}")))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

/// The transport built-in providers use by default.
pub fn default_transport() -> Arc<dyn Transport> {
    #[cfg(feature = "http")]
    {
        Arc::new(UreqTransport::new(REQUEST_TIMEOUT))
    }
    #[cfg(not(feature = "http"))]
    {
        Arc::new(UnavailableTransport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range() {
        let ok = HttpResponse {
            status: 204,
            status_text: "No Content".into(),
            body: String::new(),
        };
        assert!(ok.is_success());
        let bad = HttpResponse { status: 403, ..ok };
        assert!(!bad.is_success());
    }

    #[test]
    fn unavailable_transport_errors() {
        let req = HttpRequest {
            url: "https://example.invalid".into(),
            headers: Vec::new(),
            body: serde_json::json!({}),
        };
        assert!(matches!(
            UnavailableTransport.post_json(&req),
            Err(ByoaiError::TransportUnavailable)
        ));
    }
}
