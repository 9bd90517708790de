//! LabSafe Server - PPE compliance verification over HTTP.
//!
//! Wires the upload area, the Gemini vision backend, and the HTTP API
//! together from configuration and runs until stopped.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labsafe_api::AppState;
use labsafe_inference::{GeminiClient, GeminiConfig};
use storage::ArtifactStore;

mod config;

use crate::config::{CliArgs, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "labsafe_server=debug,labsafe_api=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = ServerConfig::load(&args)?;

    info!("Starting LabSafe Server v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP: {}:{}", config.http.host, config.http.port);
    info!("Upload area: {}", config.uploads.dir.display());
    info!("Vision model: {}", config.inference.model);

    let Some(api_key) = args.api_key.clone().filter(|k| !k.is_empty()) else {
        bail!("GOOGLE_API_KEY must be set (environment variable or --api-key)");
    };

    let mut gemini = GeminiConfig::new(api_key, config.inference.model.clone());
    gemini.timeout = Duration::from_secs(config.inference.timeout_secs);
    let backend = Arc::new(GeminiClient::new(gemini));

    let artifacts =
        ArtifactStore::new(&config.uploads.dir).context("failed to prepare upload area")?;

    let state = Arc::new(AppState::new(artifacts, backend));
    labsafe_api::run_server(state, config.api_config()).await
}
