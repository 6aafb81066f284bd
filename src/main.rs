#![forbid(unsafe_code)]

use std::path::Path;

use anyhow::{Context, Result};
use chessdaily::{
    config::{load_env_file, Config},
    server::{build_router, AppState},
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env_file(Path::new(".env"))?;

    let config = Config::from_env().context("invalid configuration")?;
    init_tracing(config.log_json);

    let state = AppState::from_config(&config).context("failed to configure store client")?;
    let app = build_router(state, config.assets_dir.as_deref());

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        store = %config.store_url,
        data_dir = %config.data_dir.display(),
        "chessdaily listening"
    );

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
