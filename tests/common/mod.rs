use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub const ITEM_ID: &str = "abcdefghijklmnopabcdefghijklmnop";

#[allow(dead_code)]
pub const WEBSTORE_SCOPE: &str = "https://www.googleapis.com/auth/chromewebstore";

/// Writes a fake extension package into a fresh temp dir.
#[allow(dead_code)]
pub fn temp_package(contents: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let package_path = temp_dir.path().join("extension.zip");
    fs::write(&package_path, contents).expect("failed to write package file");
    (temp_dir, package_path)
}

/// A well-formed token endpoint response granting the store scope.
#[allow(dead_code)]
pub fn token_response_body() -> serde_json::Value {
    serde_json::json!({
        "access_token": "ya29.integration",
        "expires_in": 3599,
        "scope": WEBSTORE_SCOPE,
        "token_type": "Bearer"
    })
}

/// An item response with the given upload state.
#[allow(dead_code)]
pub fn item_response_body(upload_state: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "chromewebstore#item",
        "id": ITEM_ID,
        "uploadState": upload_state,
        "crxVersion": "1.4.0"
    })
}

/// An accepted publish response.
#[allow(dead_code)]
pub fn publish_response_body() -> serde_json::Value {
    serde_json::json!({
        "kind": "chromewebstore#item",
        "item_id": ITEM_ID,
        "status": ["OK"],
        "statusDetail": ["Publish item request has been accepted."]
    })
}
