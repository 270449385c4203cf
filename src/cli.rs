//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Warehouse analytics service - reports and slotting optimization intake
#[derive(Parser, Debug)]
#[command(name = "wms-analytics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "WMS_ANALYTICS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "WMS_ANALYTICS_PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "WMS_ANALYTICS_HOST")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "info",
        env = "WMS_ANALYTICS_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "WMS_ANALYTICS_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand (optional - defaults to server mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the analytics server (default)
    Serve,

    /// Validate the configuration and the service token without serving
    Check,
}
