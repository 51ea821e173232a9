//! Refresh-token exchange against Google's OAuth2 token endpoint
//!
//! [`TokenRefresher::refresh`] sends one JSON `POST` carrying the refresh
//! token and client credentials, decodes the response, and validates that
//! the issued token is a bearer token carrying the Chrome Web Store scope.
//! A token that fails either check is never returned.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WebstoreError};
use crate::transport::{HttpRequest, HttpTransport, Method};

/// Scope that must be granted for any store API call to succeed.
pub const CHROME_WEBSTORE_SCOPE: &str = "https://www.googleapis.com/auth/chromewebstore";

/// Default OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// OAuth client credentials plus the long-lived refresh token.
///
/// `Debug` output redacts the secret and the refresh token so the struct
/// can appear in log lines safely.
///
/// # Examples
///
/// ```
/// use webstore_publish::auth::Credentials;
///
/// let creds = Credentials::new("client-id", "s3cret", "1//refresh");
/// let debug = format!("{:?}", creds);
/// assert!(debug.contains("client-id"));
/// assert!(!debug.contains("s3cret"));
/// assert!(!debug.contains("1//refresh"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AccessToken
// ---------------------------------------------------------------------------

/// A validated, short-lived access token.
///
/// Only ever produced by [`TokenRefresher::refresh`], so holding one means
/// the scope and token-type checks already passed.
#[derive(Clone)]
pub struct AccessToken {
    /// The bearer token string.
    pub access_token: String,

    /// Space-separated scopes granted by the authorization server.
    pub scope: String,

    /// Token kind, always `"Bearer"` once validated.
    pub token_type: String,

    /// UTC instant derived from `expires_in`. Informational only; the
    /// token is used once and never refreshed again.
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Value for the `Authorization` header.
    ///
    /// # Examples
    ///
    /// ```
    /// use webstore_publish::auth::AccessToken;
    ///
    /// let token = AccessToken {
    ///     access_token: "ya29.abc".to_string(),
    ///     scope: "https://www.googleapis.com/auth/chromewebstore".to_string(),
    ///     token_type: "Bearer".to_string(),
    ///     expires_at: None,
    /// };
    /// assert_eq!(token.authorization_header(), "Bearer ya29.abc");
    /// ```
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"<redacted>")
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    token_type: String,
}

impl TokenResponse {
    /// Checks the post-conditions and converts into an [`AccessToken`].
    fn validate(self) -> Result<AccessToken> {
        if !self.scope.contains(CHROME_WEBSTORE_SCOPE) {
            return Err(WebstoreError::MissingScope(self.scope).into());
        }

        if self.token_type != "Bearer" {
            return Err(WebstoreError::InvalidTokenType(self.token_type).into());
        }

        let expires_at = self
            .expires_in
            .and_then(chrono::Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));

        Ok(AccessToken {
            access_token: self.access_token,
            scope: self.scope,
            token_type: self.token_type,
            expires_at,
        })
    }
}

// ---------------------------------------------------------------------------
// TokenRefresher
// ---------------------------------------------------------------------------

/// Exchanges a refresh token for an access token.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use webstore_publish::auth::{Credentials, TokenRefresher};
/// use webstore_publish::transport::http::ReqwestTransport;
///
/// # async fn example() -> webstore_publish::error::Result<()> {
/// let refresher = TokenRefresher::new(
///     Arc::new(ReqwestTransport::new()),
///     "https://www.googleapis.com/oauth2/v4/token",
/// );
/// let creds = Credentials::new("id", "secret", "refresh");
/// let token = refresher.refresh(&creds).await?;
/// println!("token expires at {:?}", token.expires_at);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TokenRefresher {
    transport: Arc<dyn HttpTransport>,
    token_url: String,
}

impl TokenRefresher {
    pub fn new(transport: Arc<dyn HttpTransport>, token_url: impl Into<String>) -> Self {
        Self {
            transport,
            token_url: token_url.into(),
        }
    }

    /// Runs the refresh-token grant once.
    ///
    /// # Errors
    ///
    /// - [`WebstoreError::Http`] if the request could not be sent.
    /// - [`WebstoreError::RequestFailed`] on any non-200 status, carrying
    ///   the raw body.
    /// - [`WebstoreError::Serialization`] if the body is not a token response.
    /// - [`WebstoreError::MissingScope`] / [`WebstoreError::InvalidTokenType`]
    ///   if the issued token cannot be used against the store.
    pub async fn refresh(&self, credentials: &Credentials) -> Result<AccessToken> {
        let payload = TokenRequest {
            refresh_token: &credentials.refresh_token,
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            grant_type: "refresh_token",
        };
        let body = serde_json::to_vec(&payload).map_err(WebstoreError::Serialization)?;

        let request = HttpRequest::new(Method::Post, self.token_url.as_str())
            .header("Content-Type", "application/json")
            .body(body);

        let resp = self.transport.send(request).await?.ensure_ok()?;
        let raw: TokenResponse = resp.json()?;
        let token = raw.validate()?;

        tracing::debug!(
            scope = %token.scope,
            expires_at = ?token.expires_at,
            "Access token issued"
        );

        Ok(token)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
