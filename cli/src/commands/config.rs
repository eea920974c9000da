// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Configuration management commands
//!
//! Commands: show, validate, generate

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use certgate_core::domain::config::{CertgateConfig, StorageKind, CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show config file paths checked
        #[arg(long)]
        paths: bool,

        /// Print the effective configuration as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Validate configuration file
    Validate {
        /// Path to config file (default: discover)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Generate sample configuration
    Generate {
        /// Output path
        #[arg(short, long, default_value = "./certgate-config.yaml")]
        output: PathBuf,

        /// Include examples and comments
        #[arg(long)]
        examples: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub async fn handle_command(command: ConfigCommand, config_override: Option<PathBuf>) -> Result<()> {
    match command {
        ConfigCommand::Show { paths, yaml } => show(config_override, paths, yaml),
        ConfigCommand::Validate { file } => validate(file.or(config_override)),
        ConfigCommand::Generate {
            output,
            examples,
            force,
        } => generate(output, examples, force),
    }
}

fn show(config_override: Option<PathBuf>, show_paths: bool, as_yaml: bool) -> Result<()> {
    let config = CertgateConfig::load_or_default(config_override.clone()).context("Failed to load configuration")?;

    if show_paths {
        println!("{}", "Configuration discovery paths:".bold());
        match &config_override {
            Some(path) => println!("  1. --config flag: {}", path.display()),
            None => println!("  1. --config flag: {}", "(not set)".dimmed()),
        }
        println!(
            "  2. {}: {}",
            CONFIG_PATH_ENV,
            std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| "(not set)".to_string())
                .dimmed()
        );
        println!("  3. ./{}", DEFAULT_CONFIG_FILE);
        println!();
    }

    if as_yaml {
        print!("{}", config.to_yaml_string()?);
        return Ok(());
    }

    println!("{}", "Current configuration:".bold());
    println!();

    println!("{}", "Storage:".bold());
    match config.storage.backend {
        StorageKind::InMemory => println!("  Backend: in-memory {}", "(not persisted between runs)".dimmed()),
        StorageKind::Postgres => {
            println!("  Backend: postgres");
            println!("  Max connections: {}", config.storage.max_connections);
            if let Some(conn) = &config.storage.connection_string {
                println!("  Connection: {}", redact(conn));
            }
        }
    }
    println!();

    println!("{}", "Vendor Testing Suite:".bold());
    println!(
        "  Endpoint: {}",
        config
            .testing_suite
            .endpoint
            .as_deref()
            .unwrap_or("(none - automated tests require manual review)")
    );
    println!(
        "  API key: {}",
        if config.testing_suite.api_key.is_some() { "(set)" } else { "(none)" }
    );
    println!("  Timeout: {}s", config.testing_suite.timeout_seconds);
    println!(
        "  Retries: {} attempt(s), {}ms base delay",
        config.testing_suite.max_retries, config.testing_suite.retry_delay_ms
    );
    println!();

    println!("{}", "Logging:".bold());
    println!("  Level: {}", config.logging.level);
    println!("  Format: {:?}", config.logging.format);

    Ok(())
}

/// Hide inline credentials; `env:` references are shown as-is
fn redact(connection_string: &str) -> String {
    if connection_string.starts_with("env:") {
        return connection_string.to_string();
    }
    match (connection_string.find("://"), connection_string.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &connection_string[..scheme_end], &connection_string[at..])
        }
        _ => connection_string.to_string(),
    }
}

fn validate(config_path: Option<PathBuf>) -> Result<()> {
    println!("Validating configuration...");

    let config = CertgateConfig::load_or_default(config_path).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    config
        .storage_backend()
        .context("Failed to resolve storage backend")?;
    config
        .testing_suite
        .resolved_api_key()
        .context("Failed to resolve testing suite API key")?;

    println!("{}", "✓ Configuration is valid".green());
    Ok(())
}

fn generate(output: PathBuf, with_examples: bool, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let sample = if with_examples {
        include_str!("../../templates/config-with-examples.yaml")
    } else {
        include_str!("../../templates/config-minimal.yaml")
    };

    std::fs::write(&output, sample).with_context(|| format!("Failed to write config to {:?}", output))?;

    println!("{} {}", "✓ Configuration written to".green(), output.display());
    Ok(())
}
