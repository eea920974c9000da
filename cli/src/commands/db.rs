// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Database Migration Command
//!
//! `certgate db migrate` applies the schema migrations bundled with
//! `certgate-core` to the configured PostgreSQL database.
//!
//! # Usage
//!
//! ```bash
//! # Apply all pending migrations
//! certgate db migrate
//!
//! # Preview migrations without applying
//! certgate db migrate --dry-run
//! ```
//!
//! Requires the postgres storage backend, either in the config file or via
//! `CERTGATE_DATABASE_URL`.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use certgate_core::domain::config::CertgateConfig;
use certgate_core::domain::repository::StorageBackend;
use certgate_core::infrastructure::db::{Database, MIGRATOR};

#[derive(Subcommand)]
pub enum DbCommand {
    /// Apply pending schema migrations
    Migrate {
        /// Perform a dry run without applying changes
        #[arg(long)]
        dry_run: bool,
    },
}

pub async fn handle_command(command: DbCommand, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        DbCommand::Migrate { dry_run } => migrate(config_path, dry_run).await,
    }
}

async fn migrate(config_path: Option<PathBuf>, dry_run: bool) -> Result<()> {
    println!("{}", "Certgate Database Migration".bold().green());

    let config = CertgateConfig::load_or_default(config_path).context("Failed to load configuration")?;
    let StorageBackend::PostgreSQL(postgres) = config.storage_backend()? else {
        anyhow::bail!("Storage backend is in-memory; set CERTGATE_DATABASE_URL or configure storage.backend: postgres");
    };

    println!("Connecting to database...");
    let database = Database::new(&postgres).await?;

    let applied_count = sqlx::query("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(database.get_pool())
        .await
        .map(|rows| rows.len())
        .unwrap_or(0);
    let total_migrations = MIGRATOR.iter().count();

    println!(
        "Migration status: {} applied, {} total available.",
        applied_count, total_migrations
    );

    if applied_count >= total_migrations {
        println!("{}", "✓ Database is up to date.".green());
        return Ok(());
    }

    if dry_run {
        println!("Pending migrations found (Dry Run):");
        for migration in MIGRATOR.iter().skip(applied_count) {
            println!(" - {} {}", migration.version, migration.description);
        }
        println!("Skipping application due to --dry-run");
        return Ok(());
    }

    println!("Applying pending migrations...");
    database.migrate().await?;
    println!("{}", "✓ Database updated successfully.".green());
    Ok(())
}
