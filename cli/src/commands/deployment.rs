// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Vendor deployment commands
//!
//! Commands: add, list

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;

use certgate_core::domain::deployment::{Deployment, DeploymentStatus};
use certgate_core::domain::repository::DeploymentRepository;

use crate::services::CertgateServices;

#[derive(Subcommand)]
pub enum DeploymentCommand {
    /// Record a vendor deployment at a health system
    Add {
        #[arg(long)]
        vendor_id: String,

        #[arg(long)]
        health_system: String,

        /// active, pending, inactive, terminated
        #[arg(long, default_value = "active")]
        status: DeploymentStatus,
    },

    /// List a vendor's deployments
    List {
        #[arg(long)]
        vendor_id: String,
    },
}

pub async fn handle_command(command: DeploymentCommand, config_path: Option<PathBuf>) -> Result<()> {
    let services = CertgateServices::load(config_path).await?;
    let repository = &services.repositories.deployments;

    match command {
        DeploymentCommand::Add {
            vendor_id,
            health_system,
            status,
        } => {
            let deployment = Deployment::new(vendor_id, health_system, status);
            repository
                .save(&deployment)
                .await
                .context("Failed to record deployment")?;
            println!("{} {}", "✓ Deployment recorded:".green(), deployment.id);
            Ok(())
        }
        DeploymentCommand::List { vendor_id } => {
            let deployments = repository.find_by_vendor_id(&vendor_id).await?;
            let active = repository.count_active_by_vendor_id(&vendor_id).await?;

            for deployment in &deployments {
                println!(
                    "  {} {:<30} {:<10} since {}",
                    deployment.id,
                    deployment.health_system,
                    deployment.status.as_str(),
                    deployment.started_at.format("%Y-%m-%d")
                );
            }
            println!("{} {} active of {}", "Deployments:".bold(), active, deployments.len());
            Ok(())
        }
    }
}
