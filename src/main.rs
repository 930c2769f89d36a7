use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tutor_service::{
    build_app,
    config::{AppConfig, CorsPolicy},
    provider::GeminiClient,
    run_server, AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;

    if matches!(config.cors, CorsPolicy::AnyOrigin) {
        warn!("CORS allows every origin with credentials; restrict CORS_ALLOWED_ORIGINS outside development");
    }

    let gemini = GeminiClient::new(config.gemini.clone());
    info!(model = gemini.model(), "Tutor service starting");

    let app = build_app(AppState::new(Arc::new(gemini)), &config.cors);
    run_server(app, config.bind_addr())
        .await
        .with_context(|| format!("server failed on {}", config.bind_addr()))
}
