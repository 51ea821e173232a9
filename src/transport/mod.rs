//! HTTP transport abstraction and implementations
//!
//! This module defines the [`HttpTransport`] trait that the token refresher
//! and the store client send their requests through. Concrete
//! implementations live in submodules:
//!
//! - [`http::ReqwestTransport`] -- real network I/O over `reqwest`.
//! - [`fake::FakeTransport`] -- in-process fake used in tests (cfg(test)
//!   only).
//!
//! # Design
//!
//! The trait is intentionally minimal: callers `send` a fully described
//! [`HttpRequest`] and get back the status code and the raw body bytes.
//! Decoding and status interpretation belong to the callers.

use serde::de::DeserializeOwned;

use crate::error::{Result, WebstoreError};

/// HTTP verbs used against Google's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        f.write_str(s)
    }
}

/// A fully described outbound request.
///
/// # Examples
///
/// ```
/// use webstore_publish::transport::{HttpRequest, Method};
///
/// let request = HttpRequest::new(Method::Post, "https://example.com/token")
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec());
///
/// assert_eq!(request.header_value("content-type"), Some("application/json"));
/// assert_eq!(request.body.as_deref(), Some(&b"{}"[..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header. Names are sent as given.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the first header matching `name`, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fails with [`WebstoreError::RequestFailed`] unless the status is exactly 200.
    ///
    /// The error carries the body text verbatim.
    pub fn ensure_ok(self) -> Result<Self> {
        if self.status != 200 {
            return Err(WebstoreError::RequestFailed {
                status: self.status,
                body: self.text(),
            }
            .into());
        }
        Ok(self)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        let value = serde_json::from_slice(&self.body).map_err(WebstoreError::Serialization)?;
        Ok(value)
    }
}

/// Abstraction over the HTTP client.
///
/// Implementations must issue exactly one request per call and must not
/// retry. Non-2xx statuses are returned as ordinary responses, never as
/// errors; only transport-level failures are errors.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Send `request` and wait for the complete response.
    ///
    /// # Errors
    ///
    /// Returns [`WebstoreError::Http`] if the request could not be sent or
    /// the body could not be read.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

pub mod http;

#[cfg(test)]
pub mod fake;
