use std::sync::Arc;
use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use site_backend::{build_router, config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,site_backend=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    if config.is_development() {
        tracing::info!("Running in development mode");
    }
    let port = config.port;
    let state = Arc::new(AppState::from_config(config).context("failed to set up mailer")?);
    let app = build_router(state);

    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
