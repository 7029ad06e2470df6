//! Roomline terminal client entry point.

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use roomline_tui::{
    Backend, Identity, Runtime, SessionController, TerminalDriver, config, transport,
};
use tracing_subscriber::EnvFilter;

/// Roomline terminal chat client
#[derive(Parser, Debug)]
#[command(name = "roomline")]
#[command(about = "Multi-room terminal chat client")]
#[command(version)]
struct Args {
    /// Broker WebSocket URL (ws://host:port/path)
    ///
    /// If not provided, runs against an in-process simulated broker.
    #[arg(short, long)]
    server: Option<String>,

    /// Username to chat as. Defaults to a generated guest name.
    ///
    /// Sent to the broker as the `username` query parameter.
    #[arg(short, long)]
    identity: Option<String>,

    /// TOML session config (default room, room list, reconnect policy)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log file. The terminal is in raw mode, so logs never go to stderr.
    #[arg(long, default_value = "roomline.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(File::create(&args.log_file)?))
        .with_ansi(false)
        .init();

    let session_config = config::load(args.config.as_deref())?;
    let identity = args.identity.map_or_else(config::guest_identity, Identity::new);
    tracing::info!(identity = %identity, server = ?args.server, "starting");

    let backend = match args.server {
        Some(url) => Backend::WebSocket(transport::broker_url(&url, &identity)?),
        None => Backend::Simulated {
            identity: identity.clone(),
            rooms: session_config.directory(),
        },
    };

    let driver = TerminalDriver::new(backend)?;
    let session = SessionController::new(identity, session_config);

    Ok(Runtime::new(driver, session).run().await?)
}
