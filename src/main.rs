//! Shoe Size Converter
//!
//! A small web service that converts shoe sizes between regional scales.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌───────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http::server ──▶ http::convert             │
//!                             │   (request id,       │                        │
//!                             │    trace, timeout,   ▼                        │
//!                             │    body limit)   sizing::chart (men/women)   │
//!                             │                      │                        │
//!                             │                      ▼                        │
//!     Client Response         │                  sizing::matcher              │
//!     ◀───────────────────────┼── http::response ◀── (nearest row ≤ 5 away)   │
//!                             │                                               │
//!                             │  config · observability · lifecycle           │
//!                             └───────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use shoe_size_converter::config::{load_config, validation::validate_config, ConfigError, ConverterConfig};
use shoe_size_converter::http::HttpServer;
use shoe_size_converter::lifecycle::{wait_for_signal, Shutdown};
use shoe_size_converter::observability::logging;
use shoe_size_converter::observability::metrics::init_metrics;

#[derive(Parser)]
#[command(name = "shoe-size-converter")]
#[command(about = "Shoe size conversion web service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn load(args: &Args) -> Result<ConverterConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ConverterConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load(&args)?;

    logging::init(&config.observability);

    tracing::info!("shoe-size-converter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_path = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
