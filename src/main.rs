//! HTTP server for the WCP compliance engine.
//!
//! Environment:
//! - `WCP_CONFIG_DIR`: configuration directory (default `./config/wcp`)
//! - `WCP_BIND_ADDR`: overrides `server.bind_address` from `engine.yaml`
//! - `RUST_LOG`: log filter (default `info`)

use std::error::Error;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wcp_compliance::api::{AppState, create_router};
use wcp_compliance::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/wcp";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("WCP_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind_address = std::env::var("WCP_BIND_ADDR")
        .unwrap_or_else(|_| config.settings().server.bind_address.clone());

    let state = AppState::from_config(&config)?;
    let determination = config
        .wage_determination()
        .map(|wd| wd.id.as_str())
        .unwrap_or("builtin");
    tracing::info!(
        config_dir = %config_dir,
        provider = state.engine().provider_name(),
        roles = state.roles().len(),
        wage_determination = determination,
        "Configuration loaded"
    );

    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(
        "Starting WCP compliance engine {} on {}",
        env!("CARGO_PKG_VERSION"),
        bind_address
    );
    axum::serve(listener, router).await?;

    Ok(())
}
