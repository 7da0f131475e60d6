//! # Case Law Assistant Main Driver
//!
//! ## Purpose
//! Main entry point for the case law assistant server. Orchestrates
//! initialization of all system components and starts the web server for
//! handling officer queries.
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Load the case corpus and generative capability
//! 4. Start web API server
//! 5. Handle shutdown signals gracefully

use clap::{Arg, Command};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use caselaw_assistant::{
    api::ApiServer,
    config::Config,
    corpus::Corpus,
    errors::{AssistError, Result},
    AppState, Generative,
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("caselaw-assist-server")
        .version("0.1.0")
        .author("Legal Search Team")
        .about("Case law assistant answering officer queries with precedent summaries")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("check-health")
                .long("check-health")
                .help("Validate configuration and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").unwrap();
    let mut config = Config::from_file(config_path)?;

    // Override port if specified
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }

    let config = Arc::new(config);

    init_logging(&config)?;

    info!("Starting Case Law Assistant v0.1.0");
    info!("Configuration loaded from: {}", config_path);

    if matches.get_flag("check-health") {
        info!("Configuration is valid");
        return Ok(());
    }

    // Initialize application components
    let app_state = initialize_components(config.clone());

    // Start the API server
    let server = ApiServer::new(app_state);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Server error: {}", e);
        }
    });

    info!(
        "Case Law Assistant started successfully on {}:{}",
        config.server.host, config.server.port
    );

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = server_handle => {
            warn!("Server stopped unexpectedly");
        }
    }

    info!("Case Law Assistant shut down successfully");
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|_| AssistError::Config {
            message: format!("Invalid log level: {}", config.logging.level),
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Logging initialized with level: {}", config.logging.level);
    Ok(())
}

/// Initialize all application components
fn initialize_components(config: Arc<Config>) -> AppState {
    info!("Initializing application components...");

    let corpus = Arc::new(Corpus::load());
    let generative = Generative::from_config(&config.generative);

    if !generative.is_available() {
        warn!("Generative service unavailable; responses will use template fallbacks");
    }

    info!("All components initialized successfully");
    AppState {
        config,
        corpus,
        generative,
    }
}
