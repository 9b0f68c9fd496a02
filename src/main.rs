use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use launch_readiness::config::{Config, TrackerMode};
use launch_readiness::server::{AppState, build_router};
use launch_readiness::tracker::{DryRunGateway, LinearClient, TrackerGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    info!(?config, "Configuration loaded");

    let gateway: Arc<dyn TrackerGateway> = match &config.tracker.mode {
        TrackerMode::Linear { api_url, api_key } => {
            let client =
                LinearClient::new(api_url.as_str(), api_key.as_str(), config.tracker.request_timeout)
                    .context("failed to build Linear client")?;
            info!(api_url = client.api_url(), "Using Linear tracker");
            Arc::new(client)
        }
        TrackerMode::DryRun => {
            info!("DRY_RUN enabled: tracker calls will be logged, not sent");
            Arc::new(DryRunGateway::new())
        }
    };

    let app = build_router(AppState::from_config(&config, gateway));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// `LOG_FORMAT=json` switches to structured JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "launch_readiness=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
