//! News Gateway — Binary Entrypoint
//! Boots the Axum HTTP server, wiring settings, the upstream backend, and routes.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_gateway::api::{self, AppState};
use news_gateway::backend;
use news_gateway::config::Settings;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("news_gateway=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let settings = Settings::from_env().context("loading settings from environment")?;
    for warning in settings.validate() {
        warn!(%warning, "configuration incomplete");
    }

    let backend = backend::build_backend(&settings);
    info!(
        backend = backend.name(),
        env = %settings.env,
        "upstream backend ready"
    );

    let addr = format!("{}:{}", settings.host, settings.port);
    let state = AppState {
        backend,
        settings: Arc::new(settings),
    };
    let router = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "news gateway listening");
    axum::serve(listener, router).await.context("serving HTTP")
}
