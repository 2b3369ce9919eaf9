mod app;
mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod period;
mod services;
mod state;
mod stores;
#[cfg(test)]
mod test_utils;
mod token;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::Config,
    period::Calendar,
    state::AppState,
    stores::{MemoryStateStore, RedisStateStore, StateStore, Stores},
};

#[derive(Parser)]
#[command(name = "droppy-api")]
#[command(about = "Droppy Dash API server")]
struct Args {
    /// Validate configuration and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = envy::prefixed("DROPPY_").from_env::<Config>()?;

    // Initialize Sentry for error tracking (must be done early, guard must stay alive)
    let _sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: Some(config.env.clone().into()),
                ..Default::default()
            },
        ))
    });

    // Set up tracing: JSON in production, human-readable otherwise
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }

    config.validate()?;

    let calendar = Calendar::new(config.timezone()?);
    tracing::info!(
        tz = %config.week_tz,
        local_time = %calendar.zoned_parts(Utc::now()),
        "Leaderboard clock"
    );

    if args.check_config {
        tracing::info!(store = %config.store, "Configuration OK");
        return Ok(());
    }

    let state_store: Arc<dyn StateStore> =
        match config.redis_url.as_deref().filter(|url| !url.is_empty()) {
            Some(url) => {
                let client = redis::Client::open(url)?;
                Arc::new(RedisStateStore::new(client, &config.store))
            }
            None => {
                tracing::warn!("DROPPY_REDIS_URL not set, state is kept in memory");
                Arc::new(MemoryStateStore::new())
            }
        };

    let state = AppState::new(config.clone(), Stores { state: state_store })?;
    let app = app::build(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
