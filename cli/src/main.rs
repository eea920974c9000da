// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Certgate CLI
//!
//! The `certgate` binary drives the vendor certification gate: submitting
//! applications, running automated checks, and recording reviewer decisions.
//!
//! ## Commands
//!
//! - `certgate application submit|process|approve|reject|show|list` - Application lifecycle
//! - `certgate deployment add|list` - Vendor deployment records
//! - `certgate config show|validate|generate` - Configuration management
//! - `certgate db migrate` - PostgreSQL schema migrations
//!
//! With the default in-memory backend every invocation starts empty; use
//! `application submit --process` for a one-shot run, or configure PostgreSQL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use certgate_cli::commands::{self, ApplicationCommand, ConfigCommand, DbCommand, DeploymentCommand};
use certgate_core::domain::config::{CertgateConfig, LogFormat, LoggingConfig};

/// Certgate - tiered vendor certification gating
#[derive(Parser)]
#[command(name = "certgate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, env = "CERTGATE_CONFIG_PATH", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the config file's level
    #[arg(long, global = true, env = "CERTGATE_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Certification application lifecycle
    #[command(name = "application", alias = "app")]
    Application {
        #[command(subcommand)]
        command: ApplicationCommand,
    },

    /// Vendor deployment records
    #[command(name = "deployment")]
    Deployment {
        #[command(subcommand)]
        command: DeploymentCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Database maintenance
    #[command(name = "db")]
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; errors surface later
    let logging = CertgateConfig::load_or_default(cli.config.clone())
        .map(|config| config.logging)
        .unwrap_or_default();
    init_logging(cli.log_level.as_deref(), &logging)?;

    match cli.command {
        Some(Commands::Application { command }) => commands::application::handle_command(command, cli.config).await,
        Some(Commands::Deployment { command }) => commands::deployment::handle_command(command, cli.config).await,
        Some(Commands::Config { command }) => commands::config::handle_command(command, cli.config).await,
        Some(Commands::Db { command }) => commands::db::handle_command(command, cli.config).await,
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level_override: Option<&str>, logging: &LoggingConfig) -> Result<()> {
    let level = level_override.unwrap_or(&logging.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }

    Ok(())
}
