use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_service::server::{self, shutdown_signal};
use movie_service::{Config, InMemoryGateway, MongoGateway, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = Config::from_env()?;
    tracing::info!(addr = %config.listen_addr, backend = ?config.store.backend, "loaded configuration");

    // --- Listener ---
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("unable to listen on {}", config.listen_addr))?;

    // --- Storage + serve ---
    match config.store.backend {
        StoreBackend::MongoDb => {
            let gateway = MongoGateway::connect(&config.store)
                .await
                .context("could not connect to MongoDB")?;
            server::run(
                Arc::new(gateway),
                listener,
                config.request_timeout,
                shutdown_signal(),
            )
            .await?;
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory storage, data is lost on exit");
            server::run(
                Arc::new(InMemoryGateway::new()),
                listener,
                config.request_timeout,
                shutdown_signal(),
            )
            .await?;
        }
    }

    tracing::info!("done");
    Ok(())
}
