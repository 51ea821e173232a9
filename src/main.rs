//! webstore-publish - Chrome Web Store upload/publish action
//!
#![doc = "Main entry point for the webstore-publish binary."]

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use webstore_publish::cli::Cli;
use webstore_publish::commands::{self, Outcome};
use webstore_publish::config::Config;
use webstore_publish::transport::http::ReqwestTransport;
use webstore_publish::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Parse command line arguments and INPUT_* environment
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Single place where failures are reported and the exit code is chosen
    match run(&cli).await {
        Ok(outcome) => {
            tracing::debug!("Finished with {}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<Outcome> {
    let config = Config::from_cli(cli)?;
    config.validate()?;

    tracing::info!("Running action {}", config.action);
    if let Some(target) = &config.target {
        tracing::debug!(
            extension_id = %target.extension_id,
            credentials = ?target.credentials,
            "Publish target"
        );
    }

    let transport = Arc::new(ReqwestTransport::new());
    commands::run(&config, transport).await
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json_logs: bool) {
    let default_directive = if verbose {
        "webstore_publish=debug"
    } else {
        "webstore_publish=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}
