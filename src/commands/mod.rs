//! Action driver
//!
//! Runs the linear sequence for the configured action:
//!
//! 1. `test` reports immediately without any network call.
//! 2. Otherwise the package is read, an access token is refreshed and the
//!    package is uploaded.
//! 3. `uploadPublish` additionally publishes the uploaded draft.
//!
//! The output file is written once, after the last step succeeded. Any
//! error ends the run with nothing written.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::auth::TokenRefresher;
use crate::config::{Action, Config};
use crate::error::{Result, WebstoreError};
use crate::output::{write_output, RESULT_KEY};
use crate::store::StoreClient;
use crate::transport::HttpTransport;

/// How far a successful run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TestOk,
    UploadOk,
    PublishOk,
}

impl Outcome {
    /// Value reported under the `result` output key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::TestOk => "testOK",
            Outcome::UploadOk => "uploadOK",
            Outcome::PublishOk => "publishOK",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the configured action and records its result.
///
/// # Errors
///
/// Propagates the first failing step; the output file is left untouched.
pub async fn run(config: &Config, transport: Arc<dyn HttpTransport>) -> Result<Outcome> {
    let outcome = execute(config, transport).await?;

    write_output(&config.output_path, RESULT_KEY, outcome.as_str())?;
    tracing::info!(
        "Wrote {}={} to {}",
        RESULT_KEY,
        outcome,
        config.output_path.display()
    );

    Ok(outcome)
}

async fn execute(config: &Config, transport: Arc<dyn HttpTransport>) -> Result<Outcome> {
    if config.action == Action::Test {
        tracing::info!("Test action requested, skipping all network calls");
        return Ok(Outcome::TestOk);
    }

    let target = config.target()?;
    let package = read_package(&target.package_path)?;
    tracing::info!(
        "Loaded extension package {} ({} bytes)",
        target.package_path.display(),
        package.len()
    );

    let refresher =
        TokenRefresher::new(Arc::clone(&transport), config.endpoints.token_url.as_str());
    let token = refresher
        .refresh(&target.credentials)
        .await
        .context("failed to acquire access token")?;
    tracing::info!("Token refresh succeeded");

    let store = StoreClient::new(
        transport,
        config.endpoints.api_base_url.as_str(),
        config.endpoints.upload_base_url.as_str(),
    );

    let item = store
        .upload(&token, &target.extension_id, package)
        .await
        .context("failed to upload")?;
    tracing::info!(
        id = %item.id,
        crx_version = %item.crx_version,
        upload_state = ?item.upload_state,
        "Upload succeeded"
    );

    if !config.action.publishes() {
        return Ok(Outcome::UploadOk);
    }

    let result = store
        .publish(&token, &target.extension_id)
        .await
        .context("failed to publish")?;
    if result.is_ok() {
        tracing::info!(item_id = %result.item_id, status = ?result.status, "Publish succeeded");
    } else {
        tracing::warn!(
            item_id = %result.item_id,
            status = ?result.status,
            status_detail = ?result.status_detail,
            "Publish request accepted with non-OK status"
        );
    }

    Ok(Outcome::PublishOk)
}

fn read_package(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| {
        WebstoreError::PackageRead {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, CHROME_WEBSTORE_SCOPE};
    use crate::config::{Endpoints, PublishTarget};
    use crate::transport::fake::FakeTransport;
    use crate::transport::Method;
    use serde_json::json;
    use tempfile::TempDir;

    const ITEM_ID: &str = "abcdefghijklmnopabcdefghijklmnop";

    struct Fixture {
        dir: TempDir,
        transport: Arc<FakeTransport>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().expect("tempdir");
            std::fs::write(dir.path().join("ext.zip"), b"PK\x03\x04zip").expect("package");
            Self {
                dir,
                transport: Arc::new(FakeTransport::new()),
            }
        }

        fn config(&self, action: Action) -> Config {
            let target = match action {
                Action::Test => None,
                _ => Some(PublishTarget {
                    credentials: Credentials::new("client", "secret", "refresh"),
                    extension_id: ITEM_ID.to_string(),
                    package_path: self.dir.path().join("ext.zip"),
                }),
            };
            Config {
                action,
                output_path: self.dir.path().join("output"),
                target,
                endpoints: Endpoints {
                    token_url: "https://oauth.test/token".to_string(),
                    api_base_url: "https://api.test/v1.1".to_string(),
                    upload_base_url: "https://upload.test/v1.1".to_string(),
                },
            }
        }

        fn output(&self) -> Option<String> {
            std::fs::read_to_string(self.dir.path().join("output")).ok()
        }

        fn push_token(&self) {
            self.transport.push_json(
                200,
                json!({
                    "access_token": "ya29.run",
                    "expires_in": 3599,
                    "scope": CHROME_WEBSTORE_SCOPE,
                    "token_type": "Bearer"
                }),
            );
        }

        fn push_upload(&self, state: &str) {
            let item_error = if state == "FAILURE" {
                json!([{"error_code": "PKG_INVALID_VERSION_NUMBER", "error_detail": "bump the version"}])
            } else {
                json!([])
            };
            self.transport.push_json(
                200,
                json!({
                    "kind": "chromewebstore#item",
                    "id": ITEM_ID,
                    "uploadState": state,
                    "itemError": item_error
                }),
            );
        }

        fn push_publish(&self, status: &str) {
            self.transport.push_json(
                200,
                json!({"kind": "chromewebstore#item", "item_id": ITEM_ID, "status": [status], "statusDetail": []}),
            );
        }
    }

    #[test]
    fn test_outcome_values() {
        assert_eq!(Outcome::TestOk.as_str(), "testOK");
        assert_eq!(Outcome::UploadOk.as_str(), "uploadOK");
        assert_eq!(Outcome::PublishOk.as_str(), "publishOK");
    }

    #[tokio::test]
    async fn test_test_action_makes_no_network_calls() {
        let fx = Fixture::new();

        let outcome = run(&fx.config(Action::Test), fx.transport.clone())
            .await
            .expect("run");

        assert_eq!(outcome, Outcome::TestOk);
        assert!(fx.transport.requests().is_empty());
        assert_eq!(fx.output().as_deref(), Some("result=testOK\n"));
    }

    #[tokio::test]
    async fn test_upload_action_does_not_publish() {
        let fx = Fixture::new();
        fx.push_token();
        fx.push_upload("SUCCESS");

        let outcome = run(&fx.config(Action::Upload), fx.transport.clone())
            .await
            .expect("run");

        assert_eq!(outcome, Outcome::UploadOk);
        let requests = fx.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "https://oauth.test/token");
        assert_eq!(requests[1].method, Method::Put);
        assert_eq!(requests[1].body.as_deref(), Some(&b"PK\x03\x04zip"[..]));
        assert_eq!(fx.output().as_deref(), Some("result=uploadOK\n"));
    }

    #[tokio::test]
    async fn test_upload_publish_runs_all_three_calls() {
        let fx = Fixture::new();
        fx.push_token();
        fx.push_upload("SUCCESS");
        fx.push_publish("OK");

        let outcome = run(&fx.config(Action::UploadPublish), fx.transport.clone())
            .await
            .expect("run");

        assert_eq!(outcome, Outcome::PublishOk);
        let requests = fx.transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[2].url,
            format!("https://api.test/v1.1/items/{ITEM_ID}/publish")
        );
        assert_eq!(
            requests[2].header_value("authorization"),
            Some("Bearer ya29.run")
        );
        // Only the final result is reported.
        assert_eq!(fx.output().as_deref(), Some("result=publishOK\n"));
    }

    #[tokio::test]
    async fn test_publish_pending_review_still_reports_publish_ok() {
        let fx = Fixture::new();
        fx.push_token();
        fx.push_upload("SUCCESS");
        fx.push_publish("ITEM_PENDING_REVIEW");

        let outcome = run(&fx.config(Action::UploadPublish), fx.transport.clone())
            .await
            .expect("run");

        assert_eq!(outcome, Outcome::PublishOk);
        assert_eq!(fx.transport.requests().len(), 3);
        assert_eq!(fx.output().as_deref(), Some("result=publishOK\n"));
    }

    #[tokio::test]
    async fn test_failed_upload_skips_publish_and_output() {
        let fx = Fixture::new();
        fx.push_token();
        fx.push_upload("FAILURE");
        fx.push_publish("OK");

        let err = run(&fx.config(Action::UploadPublish), fx.transport.clone())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("failed to upload"));
        assert!(format!("{:#}", err).contains("bump the version"));
        assert!(matches!(
            err.downcast_ref::<WebstoreError>(),
            Some(WebstoreError::UploadFailed(_))
        ));
        assert_eq!(fx.transport.requests().len(), 2);
        assert!(fx.output().is_none());
    }

    #[tokio::test]
    async fn test_token_failure_stops_before_upload() {
        let fx = Fixture::new();
        fx.transport
            .push_response(401, r#"{"error": "unauthorized_client"}"#);

        let err = run(&fx.config(Action::Upload), fx.transport.clone())
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains(r#"{"error": "unauthorized_client"}"#));
        assert_eq!(fx.transport.requests().len(), 1);
        assert!(fx.output().is_none());
    }

    #[tokio::test]
    async fn test_missing_package_makes_no_network_calls() {
        let fx = Fixture::new();
        let mut config = fx.config(Action::Upload);
        if let Some(target) = config.target.as_mut() {
            target.package_path = fx.dir.path().join("missing.zip");
        }

        let err = run(&config, fx.transport.clone()).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WebstoreError>(),
            Some(WebstoreError::PackageRead { .. })
        ));
        assert!(fx.transport.requests().is_empty());
        assert!(fx.output().is_none());
    }

    #[tokio::test]
    async fn test_publish_failure_writes_no_output() {
        let fx = Fixture::new();
        fx.push_token();
        fx.push_upload("SUCCESS");
        fx.transport.push_response(500, "backend error");

        let err = run(&fx.config(Action::UploadPublish), fx.transport.clone())
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("backend error"));
        assert!(fx.output().is_none());
    }
}
