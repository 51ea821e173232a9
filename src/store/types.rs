//! Response bodies of the Chrome Web Store API (v1.1)

use serde::{Deserialize, Serialize};

/// Processing state of the most recent package upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadState {
    Pending,
    Success,
    Failure,
    InProgress,
    /// Any state this client does not know about.
    #[serde(other)]
    Unknown,
}

/// One entry of an item's `itemError` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub error_detail: String,
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code, self.error_detail)
    }
}

/// Server-side view of an extension, returned by item fetches and uploads.
///
/// # Examples
///
/// ```
/// use webstore_publish::store::{ExtensionItem, UploadState};
///
/// let json = r#"{
///     "kind": "chromewebstore#item",
///     "id": "abcdefghijklmnopabcdefghijklmnop",
///     "uploadState": "SUCCESS",
///     "crxVersion": "1.2.3"
/// }"#;
///
/// let item: ExtensionItem = serde_json::from_str(json).unwrap();
/// assert_eq!(item.upload_state, Some(UploadState::Success));
/// assert!(item.item_error.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionItem {
    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub public_key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_state: Option<UploadState>,

    #[serde(default)]
    pub crx_version: String,

    #[serde(default)]
    pub item_error: Vec<ItemError>,
}

impl ExtensionItem {
    /// Returns `true` when the store reported the upload as failed.
    pub fn upload_failed(&self) -> bool {
        self.upload_state == Some(UploadState::Failure)
    }
}

/// Result of a publish request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResult {
    #[serde(default)]
    pub kind: String,

    #[serde(default)]
    pub item_id: String,

    /// Status codes such as `OK` or `ITEM_PENDING_REVIEW`.
    #[serde(default)]
    pub status: Vec<String>,

    #[serde(default, rename = "statusDetail")]
    pub status_detail: Vec<String>,
}

impl PublishResult {
    /// Returns `true` when every reported status is `OK`.
    pub fn is_ok(&self) -> bool {
        self.status.iter().all(|s| s == "OK")
    }
}
