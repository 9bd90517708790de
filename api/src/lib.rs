//! HTTP API layer for the LabSafe server.
//!
//! Routes:
//! - `GET /` and `GET /health` — liveness
//! - `POST /google-auth` — find-or-create user
//! - `POST /report` / `GET /get-reports` — incident reports
//! - `POST /verify-safety` — the PPE verification pipeline
//! - `GET /uploads/*` — persisted report images

mod config;
mod error;
mod extract;
mod middleware;
mod router;
mod routes;
mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use routes::verify::VerifySafetyResponse;
pub use state::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

/// Run the HTTP API server until it fails or is shut down.
///
/// # Errors
///
/// Returns an error if the bind address is invalid, the port is already
/// in use, or the server hits a fatal error.
pub async fn run_server(state: Arc<AppState>, config: ApiConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("LabSafe API server listening on http://{addr}");

    let app = build_router(state, &config);
    axum::serve(listener, app).await?;

    Ok(())
}
