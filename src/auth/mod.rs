//! OAuth2 support for the Chrome Web Store
//!
//! Only the refresh-token grant is implemented: the action is handed a
//! long-lived refresh token and trades it for a short-lived bearer token
//! once per run.

pub mod token;

pub use token::{AccessToken, Credentials, TokenRefresher, CHROME_WEBSTORE_SCOPE};
