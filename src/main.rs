use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use problem_gateway::config::load_config;
use problem_gateway::http::HttpServer;
use problem_gateway::lifecycle::{signals, Shutdown};
use problem_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "problem-gateway")]
#[command(about = "HTTP gateway for ITSM problem records", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener port, overriding PORT and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut config, warnings) = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("problem-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    for warning in &warnings {
        tracing::warn!(issue = %warning, "Configuration warning");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        max_body_bytes = config.http.max_body_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address was checked by validation.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Server running");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let serve = tokio::spawn(server.run(listener, server_shutdown));

    signals::wait_for_signal().await;
    shutdown.trigger();

    serve.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
