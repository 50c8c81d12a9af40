//! fyyur CLI - run the venue/artist booking server and manage its config
//!
//! - `serve` bootstraps the schema and runs the HTTP server
//! - `config` inspects or creates ~/.fyyur/config.toml

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::FyyurConfig;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "fyyur",
    author,
    version,
    about = "Venue and artist booking site backed by PostgreSQL",
    long_about = "List, search and edit venues and artists, and book shows between them. \
                  Configuration is read from ~/.fyyur/config.toml, then the environment \
                  (a .env file is loaded), then command-line flags."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.fyyur/config.toml
    #[arg(long, global = true, env = "FYYUR_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (creates tables on first start)
    Serve(commands::serve::ServeArgs),
    /// Manage fyyur configuration (init, show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = FyyurConfig::load(cli.config.as_deref())?;
            init_tracing(&TracingConfig {
                debug: cli.debug,
                level: config.logging.level.clone(),
                file: config.logging.file.clone(),
            })?;
            commands::run_serve(args, config).await?
        }
        Commands::Config(args) => config::run_config(args, cli.config.as_deref())?,
    }
    Ok(())
}
