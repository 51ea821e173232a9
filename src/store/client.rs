//! Chrome Web Store item, upload and publish calls
//!
//! Every request carries the bearer token and `x-goog-api-version: 2`.
//! Each operation is a single request; nothing here orders them; the
//! caller decides that an upload precedes a publish.

use std::sync::Arc;

use crate::auth::AccessToken;
use crate::error::{Result, WebstoreError};
use crate::store::types::{ExtensionItem, PublishResult};
use crate::transport::{HttpRequest, HttpTransport, Method};

/// Default base URL for item and publish requests.
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/chromewebstore/v1.1";

/// Default base URL for package uploads.
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/chromewebstore/v1.1";

const API_VERSION_HEADER: &str = "x-goog-api-version";
const API_VERSION: &str = "2";
const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Client for the three store operations.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use webstore_publish::store::{StoreClient, DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL};
/// use webstore_publish::transport::http::ReqwestTransport;
///
/// let client = StoreClient::new(
///     Arc::new(ReqwestTransport::new()),
///     DEFAULT_API_BASE_URL,
///     DEFAULT_UPLOAD_BASE_URL,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StoreClient {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    upload_base: String,
}

impl StoreClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_base: impl Into<String>,
        upload_base: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            upload_base: upload_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn authorized(&self, method: Method, url: String, token: &AccessToken) -> HttpRequest {
        HttpRequest::new(method, url)
            .header("Authorization", token.authorization_header())
            .header(API_VERSION_HEADER, API_VERSION)
    }

    /// Fetches the draft projection of an item.
    ///
    /// # Errors
    ///
    /// [`WebstoreError::RequestFailed`] on any non-200 status, with the raw
    /// body; [`WebstoreError::Serialization`] if the body does not decode.
    pub async fn get_item(&self, token: &AccessToken, item_id: &str) -> Result<ExtensionItem> {
        let url = format!("{}/items/{}?projection=DRAFT", self.api_base, item_id);
        let request = self.authorized(Method::Get, url, token);

        let resp = self.transport.send(request).await?.ensure_ok()?;
        resp.json()
    }

    /// Uploads a new package for an existing item.
    ///
    /// The upload state in the response is authoritative: a 200 whose
    /// `uploadState` is `FAILURE` is still an error.
    ///
    /// # Errors
    ///
    /// [`WebstoreError::RequestFailed`] on any non-200 status,
    /// [`WebstoreError::Serialization`] on a malformed body, and
    /// [`WebstoreError::UploadFailed`] with the item's error list when the
    /// store rejected the package.
    pub async fn upload(
        &self,
        token: &AccessToken,
        item_id: &str,
        package: Vec<u8>,
    ) -> Result<ExtensionItem> {
        let url = format!("{}/items/{}?uploadType=media", self.upload_base, item_id);
        tracing::debug!(item_id, bytes = package.len(), "Uploading package");

        let request = self
            .authorized(Method::Put, url, token)
            .header("Content-Type", ZIP_CONTENT_TYPE)
            .header("Content-Length", package.len().to_string())
            .body(package);

        let resp = self.transport.send(request).await?.ensure_ok()?;
        let item: ExtensionItem = resp.json()?;

        if item.upload_failed() {
            return Err(WebstoreError::UploadFailed(item.item_error).into());
        }

        Ok(item)
    }

    /// Publishes the item's current draft.
    ///
    /// # Errors
    ///
    /// [`WebstoreError::RequestFailed`] on any non-200 status;
    /// [`WebstoreError::Serialization`] if the body does not decode.
    pub async fn publish(&self, token: &AccessToken, item_id: &str) -> Result<PublishResult> {
        let url = format!("{}/items/{}/publish", self.api_base, item_id);
        let request = self
            .authorized(Method::Post, url, token)
            .header("Content-Length", "0")
            .body(Vec::new());

        let resp = self.transport.send(request).await?.ensure_ok()?;
        resp.json()
    }
}
