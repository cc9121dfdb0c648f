use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recruiter::backend::{Deadline, MockBackend};
use recruiter::config::Config;
use recruiter::server::{build_router, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter backend v{}", env!("CARGO_PKG_VERSION"));

    // Always the simulated backend; BACKEND_URL only matters to clients of this server.
    let mock = if config.mock_latency {
        MockBackend::new()
    } else {
        MockBackend::instant()
    };
    info!(
        "Simulated backend ready (latency: {}, timeout: {:?})",
        config.mock_latency, config.request_timeout
    );

    let state = AppState {
        backend: Arc::new(Deadline::new(mock, config.request_timeout)),
    };
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
