//! Run configuration
//!
//! [`Config`] is built once from the parsed [`Cli`] and then handed to the
//! action driver; nothing below this module reads the environment.

use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::auth::Credentials;
use crate::cli::Cli;
use crate::error::{Result, WebstoreError};

/// What the run should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Report `testOK` without touching the network
    Test,
    /// Refresh a token and upload the package
    Upload,
    /// Upload, then publish the uploaded draft
    UploadPublish,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Test => "test",
            Action::Upload => "upload",
            Action::UploadPublish => "uploadPublish",
        }
    }

    /// Whether the run ends with a publish call.
    pub fn publishes(&self) -> bool {
        matches!(self, Action::UploadPublish)
    }
}

impl FromStr for Action {
    type Err = WebstoreError;

    /// Parses the exact action names; matching is case-sensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use webstore_publish::config::Action;
    ///
    /// assert_eq!("uploadPublish".parse::<Action>().unwrap(), Action::UploadPublish);
    /// assert!("UPLOAD".parse::<Action>().is_err());
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "test" => Ok(Action::Test),
            "upload" => Ok(Action::Upload),
            "uploadPublish" => Ok(Action::UploadPublish),
            other => Err(WebstoreError::UnsupportedAction(other.to_string())),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Google endpoints the run talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub api_base_url: String,
    pub upload_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: crate::auth::token::DEFAULT_TOKEN_URL.to_string(),
            api_base_url: crate::store::DEFAULT_API_BASE_URL.to_string(),
            upload_base_url: crate::store::DEFAULT_UPLOAD_BASE_URL.to_string(),
        }
    }
}

/// Inputs needed by the `upload` and `uploadPublish` actions.
#[derive(Debug, Clone)]
pub struct PublishTarget {
    pub credentials: Credentials,
    pub extension_id: String,
    pub package_path: PathBuf,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub action: Action,

    /// File the `result=<value>` line is appended to.
    pub output_path: PathBuf,

    /// Present for every action except [`Action::Test`].
    pub target: Option<PublishTarget>,

    pub endpoints: Endpoints,
}

impl Config {
    /// Builds the configuration from parsed CLI arguments.
    ///
    /// The action is checked first so that an unsupported action fails
    /// before anything else is looked at.
    ///
    /// # Errors
    ///
    /// Returns [`WebstoreError::UnsupportedAction`] for an unknown or
    /// missing action and [`WebstoreError::Config`] when a required input
    /// is absent or blank.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let action: Action = cli.action.as_deref().unwrap_or_default().parse()?;

        let output_path = cli.output.clone().ok_or_else(|| {
            WebstoreError::Config("GITHUB_OUTPUT (--output) is required".to_string())
        })?;

        let target = match action {
            Action::Test => None,
            Action::Upload | Action::UploadPublish => Some(PublishTarget {
                credentials: Credentials::new(
                    required(&cli.client_id, "INPUT_CLIENTID")?,
                    required(&cli.client_secret, "INPUT_CLIENTSECRET")?,
                    required(&cli.refresh_token, "INPUT_CLIENTREFRESHTOKEN")?,
                ),
                extension_id: required(&cli.extension_id, "INPUT_EXTENSIONID")?,
                package_path: cli
                    .extension_file
                    .clone()
                    .filter(|p| !p.as_os_str().is_empty())
                    .ok_or_else(|| {
                        WebstoreError::Config(
                            "INPUT_EXTENSIONFILE is required for this action".to_string(),
                        )
                    })?,
            }),
        };

        Ok(Self {
            action,
            output_path,
            target,
            endpoints: Endpoints {
                token_url: cli.token_url.clone(),
                api_base_url: cli.api_base_url.clone(),
                upload_base_url: cli.upload_base_url.clone(),
            },
        })
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if any endpoint is not an absolute http(s) URL or if a
    /// network action has no publish target.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("token_url", &self.endpoints.token_url),
            ("api_base_url", &self.endpoints.api_base_url),
            ("upload_base_url", &self.endpoints.upload_base_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| WebstoreError::Config(format!("Invalid {}: {}: {}", name, value, e)))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(WebstoreError::Config(format!(
                    "Invalid {}: scheme must be http or https, got {}",
                    name,
                    url.scheme()
                ))
                .into());
            }
        }

        if self.action != Action::Test && self.target.is_none() {
            return Err(WebstoreError::Config(format!(
                "action {} requires credentials, extension id and extension file",
                self.action
            ))
            .into());
        }

        Ok(())
    }

    /// Publish target, or a configuration error when absent.
    pub fn target(&self) -> Result<&PublishTarget> {
        self.target.as_ref().ok_or_else(|| {
            WebstoreError::Config(format!("action {} has no publish target", self.action)).into()
        })
    }
}

fn required(value: &Option<String>, env_name: &str) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(WebstoreError::Config(format!("{} is required for this action", env_name)).into()),
    }
}
