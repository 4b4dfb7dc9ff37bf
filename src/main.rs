//! `reboot-server` binary: load config, set up logging, serve until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::Level;

use reboot_server::config::load_or_create;
use reboot_server::lifecycle::{signals::wait_for_shutdown, startup::announce};
use reboot_server::observability::init_logging;
use reboot_server::{net, DelayedReboot, HttpServer, LogSink, Shutdown, TracingSink};

#[derive(Parser, Debug)]
#[command(name = "reboot-server")]
#[command(about = "Reboot this machine on an authenticated HTTP request", version)]
struct Cli {
    /// Path to the configuration file (created with defaults if missing)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, created) = load_or_create(&cli.config)?;
    init_logging(&config.logging)?;

    if created {
        tracing::info!(path = %cli.config.display(), "Wrote default configuration");
    }

    let log: Arc<dyn LogSink> = Arc::new(TracingSink);

    let listener = match net::bind(&config.server).await {
        Ok(listener) => listener,
        Err(e) => {
            log.log(Level::ERROR, &e.to_string());
            return Err(e.into());
        }
    };
    announce(&config, log.as_ref());

    let scheduler = Arc::new(DelayedReboot::new(log.clone()));
    let server = HttpServer::new(&config, scheduler, log.clone());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let signal_log = log.clone();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        signal_log.log(Level::INFO, "Server stopped by interrupt");
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
