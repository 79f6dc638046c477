use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use greeting_server::config::{self, ConfigError, ObservabilityConfig, ServerConfig};
use greeting_server::lifecycle::{wait_for_signal, Shutdown};
use greeting_server::observability::init_logging;
use greeting_server::HttpServer;

#[derive(Parser)]
#[command(name = "greeting-server")]
#[command(about = "Plain-text greeting HTTP server", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. HOST and PORT still override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let base = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    config::apply_env_overrides(base, |key| std::env::var(key).ok())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            let _ = init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };
    init_logging(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        body_limit_bytes = config.limits.body_limit_bytes,
        "Configuration loaded"
    );

    let listener = match TcpListener::bind(config.listener.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address(),
                error = %e,
                "Failed to bind listener"
            );
            return Err(e.into());
        }
    };
    let local_addr = listener.local_addr()?;
    println!("Running on http://{local_addr}");

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
