mod config;
mod metrics;
mod request_id;
mod routes;
mod session;

use anyhow::{Context, Result};
use extract::{Extractor, HttpQaClient};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::routes::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // One client serves both the QA endpoint and the company directory
    let client = Arc::new(
        HttpQaClient::new(
            config.qa.base_url.clone(),
            config.qa.token.clone(),
            config.request_timeout(),
        )
        .context("Failed to build QA client")?,
    );

    let extractor = Extractor::new(client.clone(), config.parser.strategy);
    let state = Arc::new(AppState::new(extractor, client));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    tracing::info!(
        addr = %config.server.bind_addr,
        qa_backend = %config.qa.base_url,
        strategy = ?config.parser.strategy,
        "Server listening"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// `RUST_LOG` controls verbosity; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}
