//! Warehouse analytics service
//!
//! Stock-aging reports and slotting optimization intake behind a shared
//! service token.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use wms_analytics::{
    api::{Server, auth::ServiceAuth},
    cli::{Cli, Command},
    config::Config,
    setup_tracing,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing
    if let Err(e) = setup_tracing(&cli.log_level, cli.log_format.as_deref()) {
        eprintln!("Failed to setup tracing: {e}");
        return ExitCode::FAILURE;
    }

    match cli.command {
        Some(Command::Check) => run_check(&cli),
        Some(Command::Serve) | None => run_server(cli).await,
    }
}

/// Validate configuration and token resolution without serving
fn run_check(cli: &Cli) -> ExitCode {
    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let auth = ServiceAuth::from_config(&config.auth);
    if auth.is_configured() {
        println!("✅ Configuration ok - service token resolves to a usable value");
        ExitCode::SUCCESS
    } else {
        eprintln!("❌ Service token unset, empty, or a placeholder - protected routes would answer 500");
        ExitCode::FAILURE
    }
}

/// Run the analytics server
async fn run_server(cli: Cli) -> ExitCode {
    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(mut config) => {
            // Apply CLI overrides
            if let Some(port) = cli.port {
                config.server.port = port;
            }
            if let Some(ref host) = cli.host {
                config.server.host = host.clone();
            }
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.server.port,
        "Starting analytics service"
    );

    if let Err(e) = Server::new(config).run().await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    info!("Shutdown complete");
    ExitCode::SUCCESS
}
