//! Command-line interface definition for webstore-publish
//!
//! Every argument can also be supplied through the environment, which is
//! how a CI runner passes action inputs (`INPUT_*`) and the step output
//! file (`GITHUB_OUTPUT`).

use clap::Parser;
use std::path::PathBuf;

use crate::auth::token::DEFAULT_TOKEN_URL;
use crate::store::{DEFAULT_API_BASE_URL, DEFAULT_UPLOAD_BASE_URL};

/// webstore-publish - upload and publish Chrome Web Store extensions
///
/// Refreshes an OAuth2 access token, uploads the extension package and
/// optionally publishes it, then records `result=<value>` in the output
/// file.
#[derive(Parser, Debug, Clone)]
#[command(name = "webstore-publish")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Action to run: test, upload or uploadPublish
    #[arg(long, env = "INPUT_ACTION")]
    pub action: Option<String>,

    /// OAuth2 client ID
    #[arg(long, env = "INPUT_CLIENTID")]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, env = "INPUT_CLIENTSECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// OAuth2 refresh token
    #[arg(long, env = "INPUT_CLIENTREFRESHTOKEN", hide_env_values = true)]
    pub refresh_token: Option<String>,

    /// Chrome Web Store item ID of the extension
    #[arg(long, env = "INPUT_EXTENSIONID")]
    pub extension_id: Option<String>,

    /// Path to the packaged extension (.zip)
    #[arg(long, env = "INPUT_EXTENSIONFILE")]
    pub extension_file: Option<PathBuf>,

    /// File the `result=<value>` line is appended to
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output: Option<PathBuf>,

    /// OAuth2 token endpoint
    #[arg(long, env = "CWS_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// Base URL for item and publish requests
    #[arg(long, env = "CWS_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Base URL for package uploads
    #[arg(long, env = "CWS_UPLOAD_BASE_URL", default_value = DEFAULT_UPLOAD_BASE_URL)]
    pub upload_base_url: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "CWS_JSON_LOGS")]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments and environment
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            action: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
            extension_id: None,
            extension_file: None,
            output: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            json_logs: false,
            verbose: false,
        }
    }
}
