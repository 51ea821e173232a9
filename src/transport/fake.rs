//! In-process fake transport for unit tests
//!
//! [`FakeTransport`] records every request it is asked to send and answers
//! with responses queued ahead of time, in order. Sending with an empty
//! queue is an error, which makes "no network call was made" and "no
//! further call was made" easy to assert.
//!
//! # Example
//!
//! ```ignore
//! let transport = FakeTransport::new();
//! transport.push_json(200, serde_json::json!({"ok": true}));
//! // ... drive code under test ...
//! assert_eq!(transport.requests().len(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::{Result, WebstoreError};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug, Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.responses
            .lock()
            .expect("fake transport lock poisoned")
            .push_back(HttpResponse::new(status, body));
    }

    /// Queues a JSON response.
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_response(status, body.to_string());
    }

    /// Snapshot of every request sent so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("fake transport lock poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .expect("fake transport lock poisoned")
            .push(request.clone());

        self.responses
            .lock()
            .expect("fake transport lock poisoned")
            .pop_front()
            .ok_or_else(|| {
                WebstoreError::Config(format!(
                    "fake transport has no response queued for {} {}",
                    request.method, request.url
                ))
                .into()
            })
    }
}
