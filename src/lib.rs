//! webstore-publish - Chrome Web Store upload/publish action library
//!
//! This library refreshes an OAuth2 access token from a long-lived refresh
//! token and drives the Chrome Web Store API to upload, and optionally
//! publish, a browser extension package.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `transport`: minimal HTTP abstraction with a `reqwest` implementation
//! - `auth`: refresh-token grant and access token validation
//! - `store`: Chrome Web Store item, upload and publish calls
//! - `config`: run configuration built from the CLI
//! - `commands`: the linear action driver
//! - `output`: step output file writing
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use webstore_publish::{commands, Cli, Config};
//! use webstore_publish::transport::http::ReqwestTransport;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_cli(&Cli::parse_args())?;
//!     config.validate()?;
//!
//!     let outcome = commands::run(&config, Arc::new(ReqwestTransport::new())).await?;
//!     println!("result={}", outcome);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod store;
pub mod transport;

// Re-export commonly used types
pub use auth::{AccessToken, Credentials, TokenRefresher};
pub use cli::Cli;
pub use commands::Outcome;
pub use config::{Action, Config};
pub use error::{Result, WebstoreError};
pub use store::{ExtensionItem, PublishResult, StoreClient};
