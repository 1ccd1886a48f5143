//! # Conversion Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the rate store and the result cache
//! - Create the resolution engine and conversion service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conversion_hex::{ConversionService, ResolutionEngine, inbound::HttpServer};
use conversion_repo::{MemoryCache, build_rates};

use crate::config::{Config, LogFormat};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,conversion_app=debug,conversion_hex=debug".into());

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!("Starting conversion server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);
    tracing::info!("Anchor currencies: {}", config.anchors);

    // Build rate store (handles connection and schema)
    let rates = build_rates(&config.database_url).await?;

    let engine = ResolutionEngine::new(rates, MemoryCache::new(), config.anchors);
    let service = ConversionService::new(engine);

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await
}
