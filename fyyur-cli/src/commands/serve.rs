//! HTTP server command for fyyur
//!
//! Merges flags over the loaded config, bootstraps the schema and serves.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use fyyur_server::db::{create_pool_with_options, migrations};
use fyyur_server::http::{run_server, ServerConfig};

use crate::config::FyyurConfig;

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

/// Fully resolved settings for one server run
#[derive(Debug, PartialEq)]
struct ServePlan {
    database_url: String,
    max_connections: u32,
    server: ServerConfig,
}

fn resolve(args: ServeArgs, config: FyyurConfig) -> Result<ServePlan> {
    let database_url = args
        .database_url
        .or(config.database.url)
        .filter(|url| !url.trim().is_empty())
        .context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, \
             or [database] url in ~/.fyyur/config.toml",
        )?;

    Ok(ServePlan {
        database_url,
        max_connections: args.max_connections.unwrap_or(config.database.max_connections),
        server: ServerConfig {
            bind_addr: args.bind.unwrap_or(config.server.bind),
            cors_permissive: args.cors_permissive || config.server.cors_permissive,
        },
    })
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: FyyurConfig) -> Result<()> {
    let plan = resolve(args, config)?;

    tracing::info!("Starting fyyur server on {}", plan.server.bind_addr);

    let pool = create_pool_with_options(&plan.database_url, plan.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to create database tables")?;

    // Run server (blocks until shutdown)
    run_server(pool, plan.server)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_url(url: &str) -> FyyurConfig {
        let mut config = FyyurConfig::default();
        config.database.url = Some(url.to_string());
        config
    }

    #[test]
    fn config_values_used_without_flags() {
        let plan = resolve(ServeArgs::default(), config_with_url("postgres://cfg/fyyur")).unwrap();

        assert_eq!(plan.database_url, "postgres://cfg/fyyur");
        assert_eq!(plan.max_connections, 5);
        assert_eq!(plan.server.bind_addr, "127.0.0.1:5000".parse().unwrap());
        assert!(!plan.server.cors_permissive);
    }

    #[test]
    fn flags_override_config() {
        let args = ServeArgs {
            bind: Some("0.0.0.0:8080".parse().unwrap()),
            cors_permissive: true,
            database_url: Some("postgres://flag/fyyur".into()),
            max_connections: Some(12),
        };

        let plan = resolve(args, config_with_url("postgres://cfg/fyyur")).unwrap();

        assert_eq!(plan.database_url, "postgres://flag/fyyur");
        assert_eq!(plan.max_connections, 12);
        assert_eq!(plan.server.bind_addr.port(), 8080);
        assert!(plan.server.cors_permissive);
    }

    #[test]
    fn missing_database_url_is_actionable() {
        let err = resolve(ServeArgs::default(), FyyurConfig::default()).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let args = ServeArgs {
            database_url: Some("  ".into()),
            ..ServeArgs::default()
        };
        assert!(resolve(args, FyyurConfig::default()).is_err());
    }
}
