//! `reqwest`-backed transport
//!
//! No request timeout and no retry policy are configured; a hung
//! connection is bounded only by the client defaults.

use crate::error::{Result, WebstoreError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};

/// Sends requests over the network with a shared `reqwest::Client`.
///
/// # Examples
///
/// ```
/// use webstore_publish::transport::http::ReqwestTransport;
///
/// let transport = ReqwestTransport::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(WebstoreError::Http)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(WebstoreError::Http)?;

        tracing::debug!(status, bytes = body.len(), "Received response");

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
