use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio site contact relay and interaction controller tools")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the contact relay HTTP server
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Overrides the PORT environment variable
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load a page manifest and show what the interaction controller does with it
    Inspect {
        /// Path to the page TOML manifest
        page: PathBuf,

        /// Location hash at load time, e.g. '#Experience'
        #[arg(long, default_value = "")]
        hash: String,

        /// JSON file with a list of events to replay after load
        #[arg(long)]
        events: Option<PathBuf>,
    },
}
