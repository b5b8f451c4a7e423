//! commdesk-ui - Messaging/contacts administration web application
//!
//! Serves the CommDesk HTTP API in front of the hosted backend platform:
//! contact CRUD, message sending, user administration, dashboard stats,
//! and the contact-import pipeline.

use anyhow::Result;
use clap::Parser;
use commdesk_common::config::{resolve_app_config, CliOverrides};
use commdesk_common::PlatformClient;
use commdesk_ui::{build_router, AppState};
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments (highest priority in config resolution)
#[derive(Debug, Parser)]
#[command(name = "commdesk-ui", version, about = "CommDesk web application")]
struct Args {
    /// Listen address, e.g. 127.0.0.1:5870
    #[arg(long)]
    bind_addr: Option<String>,

    /// Base URL of the hosted backend platform
    #[arg(long)]
    platform_url: Option<String>,

    /// Service key for the hosted backend platform
    #[arg(long)]
    platform_service_key: Option<String>,

    /// Explicit config file path (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting CommDesk (commdesk-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let overrides = CliOverrides {
        bind_addr: args.bind_addr,
        platform_url: args.platform_url,
        platform_service_key: args.platform_service_key,
        config_file: args.config,
    };

    // Missing platform URL or service key is terminal at startup
    let config = match resolve_app_config(&overrides) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to resolve configuration: {}", e);
            return Err(e.into());
        }
    };
    info!("Platform endpoint: {}", config.platform.base_url);

    let platform = PlatformClient::new(&config.platform);
    let state = AppState::new(platform);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("commdesk-ui listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
