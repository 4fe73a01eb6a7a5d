//! Places-Relay: free-text place search with map-ready results
//!
//! This is the main entry point for the application.

use anyhow::{bail, Result};
use places_relay::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// How often idle clients are dropped from the rate limiter
const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        Command::Run { config } => config,
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("places-relay {}", places_relay::VERSION);
            return Ok(());
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting Places-Relay v{}", places_relay::VERSION);

    // Load configuration
    let settings = config::load(config_path.as_deref())?;
    info!(
        "Rewriter: {} ({}), places endpoint: {}",
        settings.rewriter.base_url, settings.rewriter.model, settings.google.places_endpoint
    );

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;

    // Create application state
    let state = AppState::new(settings.clone(), client)?;
    if let Some(ref limiter) = state.limiter {
        limiter.clone().spawn_pruner(LIMITER_PRUNE_INTERVAL);
        info!(
            "Rate limiter enabled: {}/min on /search, {}/min elsewhere",
            settings.server.search_per_minute, settings.server.default_per_minute
        );
    }

    let app = create_router(state);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

enum Command {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command> {
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-c" | "--config" => match args.next() {
                Some(path) => config = Some(PathBuf::from(path)),
                None => bail!("{} requires a file path", arg),
            },
            other => bail!("Unknown argument: {} (see --help)", other),
        }
    }
    Ok(Command::Run { config })
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
Places-Relay v{}
Free-text place search with map-ready results

USAGE:
    places-relay [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    PLACES_RELAY_SETTINGS_PATH  Path to settings.yml
    PLACES_RELAY_BIND_ADDRESS   Bind address
    PORT                        Server port
    GOOGLE_API_KEY              Google Places / Maps Embed key (required)
    OPENWEBUI_URL               Base URL of the chat completion service
    OPENWEBUI_API_KEY           Bearer token for the chat completion service
    RUST_LOG                    Log filter (default: info)
"#,
        places_relay::VERSION
    );
}
