// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Certification application commands
//!
//! Commands: submit, process, approve, reject, show, list

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use certgate_core::application::{
    ProcessCertificationApplicationUseCase, ProcessCertificationRequest, ProcessCertificationResponse,
    ReviewCertificationApplicationUseCase, SubmitCertificationApplicationUseCase, SubmitCertificationRequest,
};
use certgate_core::domain::certification::{ApplicationStatus, CertificationApplication, CertificationApplicationId};
use certgate_core::domain::compliance::ComplianceStatements;
use certgate_core::domain::repository::CertificationApplicationRepository;
use certgate_core::domain::tier::CertificationTier;

use crate::services::CertgateServices;

#[derive(Subcommand)]
pub enum ApplicationCommand {
    /// Submit a new certification application
    Submit {
        /// Vendor identifier
        #[arg(long)]
        vendor_id: String,

        /// Requested tier (basic, standard, premium)
        #[arg(long)]
        tier: CertificationTier,

        /// Documentation URL (repeatable)
        #[arg(long = "doc", value_name = "URL")]
        documentation_urls: Vec<String>,

        /// Compliance attestations as a JSON object, e.g. '{"hipaa":true}'
        #[arg(long, value_name = "JSON", default_value = "{}")]
        compliance: String,

        /// Vendor API endpoint the testing suite should target
        #[arg(long, value_name = "URL")]
        api_endpoint: Option<String>,

        /// Run automated checks immediately after submitting
        #[arg(long)]
        process: bool,
    },

    /// Run automated checks for an application
    Process {
        #[arg(value_name = "APPLICATION_ID")]
        application_id: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Approve an application that is in review
    Approve {
        #[arg(value_name = "APPLICATION_ID")]
        application_id: String,
    },

    /// Reject an application
    Reject {
        #[arg(value_name = "APPLICATION_ID")]
        application_id: String,

        /// Reason recorded on the application
        #[arg(short, long)]
        reason: String,
    },

    /// Show one application
    Show {
        #[arg(value_name = "APPLICATION_ID")]
        application_id: String,

        /// Print the stored snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// List applications
    List {
        /// Only applications of this vendor
        #[arg(long, conflicts_with = "status")]
        vendor_id: Option<String>,

        /// Only applications in this status (pending, in_review, approved, rejected)
        #[arg(long)]
        status: Option<ApplicationStatus>,
    },
}

pub async fn handle_command(command: ApplicationCommand, config_path: Option<PathBuf>) -> Result<()> {
    let services = CertgateServices::load(config_path).await?;

    match command {
        ApplicationCommand::Submit {
            vendor_id,
            tier,
            documentation_urls,
            compliance,
            api_endpoint,
            process,
        } => {
            let request = SubmitCertificationRequest {
                vendor_id,
                tier,
                documentation_urls,
                compliance_statements: parse_compliance(&compliance)?,
                api_endpoint,
            };
            submit(&services, request, process).await
        }
        ApplicationCommand::Process { application_id, json } => process(&services, &application_id, json).await,
        ApplicationCommand::Approve { application_id } => approve(&services, &application_id).await,
        ApplicationCommand::Reject { application_id, reason } => reject(&services, &application_id, &reason).await,
        ApplicationCommand::Show { application_id, json } => show(&services, &application_id, json).await,
        ApplicationCommand::List { vendor_id, status } => list(&services, vendor_id, status).await,
    }
}

/// Compliance flags from CLI input. Unlike stored data, malformed input is an error here.
pub fn parse_compliance(raw: &str) -> Result<ComplianceStatements> {
    let value: serde_json::Value =
        serde_json::from_str(raw).with_context(|| format!("Invalid compliance JSON: {}", raw))?;
    if !value.is_object() {
        anyhow::bail!("Compliance statements must be a JSON object, got: {}", raw);
    }
    Ok(ComplianceStatements::from_json(&value))
}

async fn submit(services: &CertgateServices, request: SubmitCertificationRequest, run_checks: bool) -> Result<()> {
    let application = services
        .submit
        .submit(request)
        .await
        .context("Failed to submit certification application")?;

    println!(
        "{} {}",
        "✓ Application submitted:".green(),
        application.id().to_string().bold()
    );
    print_application(&application);

    if run_checks {
        info!(application_id = %application.id(), "Running automated checks after submit");
        process(services, &application.id().to_string(), false).await?;
    }
    Ok(())
}

async fn process(services: &CertgateServices, application_id: &str, json: bool) -> Result<()> {
    let response = services
        .process
        .execute(ProcessCertificationRequest {
            application_id: application_id.to_string(),
        })
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_process_response(&response);
    }

    if !response.success {
        anyhow::bail!(response.error.unwrap_or_else(|| "Processing failed".to_string()));
    }
    Ok(())
}

async fn approve(services: &CertgateServices, application_id: &str) -> Result<()> {
    let application = services
        .review
        .approve(application_id)
        .await
        .context("Failed to approve application")?;

    println!(
        "{} {} ({} tier)",
        "✓ Approved".green(),
        application.id(),
        application.tier_requested().label()
    );
    Ok(())
}

async fn reject(services: &CertgateServices, application_id: &str, reason: &str) -> Result<()> {
    let application = services
        .review
        .reject(application_id, reason)
        .await
        .context("Failed to reject application")?;

    println!("{} {}", "✓ Rejected".yellow(), application.id());
    println!("  Reason: {}", application.rejection_reason().unwrap_or_default());
    Ok(())
}

async fn show(services: &CertgateServices, application_id: &str, json: bool) -> Result<()> {
    let id = CertificationApplicationId::from_string(application_id)
        .with_context(|| format!("Invalid application id: {}", application_id))?;
    let application = services
        .repositories
        .applications
        .find_by_id(id)
        .await?
        .with_context(|| format!("Application not found: {}", application_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&application.snapshot())?);
    } else {
        print_application(&application);
        if !application.recommendations().is_empty() {
            println!("  Recommendations:");
            for recommendation in application.recommendations() {
                println!("    - {}", recommendation);
            }
        }
    }
    Ok(())
}

async fn list(services: &CertgateServices, vendor_id: Option<String>, status: Option<ApplicationStatus>) -> Result<()> {
    let repository = &services.repositories.applications;
    let applications = match (vendor_id, status) {
        (Some(vendor_id), _) => repository.find_by_vendor_id(&vendor_id).await?,
        (None, Some(status)) => repository.find_by_status(status).await?,
        (None, None) => repository.list_all().await?,
    };

    if applications.is_empty() {
        println!("{}", "No applications found".dimmed());
        return Ok(());
    }

    println!(
        "{:<38} {:<20} {:<9} {:<10} {:>5}",
        "ID".bold(),
        "VENDOR".bold(),
        "TIER".bold(),
        "STATUS".bold(),
        "SCORE".bold()
    );
    for application in &applications {
        println!(
            "{:<38} {:<20} {:<9} {:<10} {:>5}",
            application.id().to_string(),
            application.vendor_id(),
            application.tier_requested().as_str(),
            colored_status(application.status()),
            application.score()
        );
    }
    Ok(())
}

fn colored_status(status: ApplicationStatus) -> colored::ColoredString {
    match status {
        ApplicationStatus::Pending => status.as_str().yellow(),
        ApplicationStatus::InReview => status.as_str().cyan(),
        ApplicationStatus::Approved => status.as_str().green(),
        ApplicationStatus::Rejected => status.as_str().red(),
    }
}

fn print_application(application: &CertificationApplication) {
    println!("  Vendor: {}", application.vendor_id());
    println!("  Tier: {}", application.tier_requested().label());
    println!("  Status: {}", colored_status(application.status()));
    println!(
        "  Documentation: {} of {} required",
        application.documentation_urls().len(),
        application.get_documentation_requirement()
    );
    if let Some(endpoint) = application.api_endpoint() {
        println!("  API endpoint: {}", endpoint);
    }
    println!("  Score: {}", application.score());
    if let Some(reason) = application.rejection_reason() {
        println!("  Rejection reason: {}", reason);
    }
}

fn check_mark(passed: bool) -> colored::ColoredString {
    if passed {
        "✓".green()
    } else {
        "✗".red()
    }
}

fn print_process_response(response: &ProcessCertificationResponse) {
    if let Some(error) = &response.error {
        println!("{} {}", "✗".red(), error);
        return;
    }

    let verdict = if response.passed {
        "PASSED".green().bold()
    } else {
        "NEEDS WORK".yellow().bold()
    };
    println!("{} {} (score {}/100)", "Automated checks:".bold(), verdict, response.score);
    if let Some(status) = response.status {
        println!("  Status: {}", colored_status(status));
    }

    let checks = &response.checks;
    println!("  {} Documentation complete", check_mark(checks.documentation_complete));
    println!("  {} Compliance statements valid", check_mark(checks.compliance_statements_valid));
    println!("  {} Deployment history valid", check_mark(checks.deployment_history_valid));
    println!("  {} PHI exposure", check_mark(checks.phi_exposure_test));
    println!("  {} Clinical accuracy", check_mark(checks.clinical_accuracy_test));
    println!("  {} Bias detection", check_mark(checks.bias_detection_test));
    println!("  {} Security scan", check_mark(checks.security_scan_test));

    if !response.recommendations.is_empty() {
        println!();
        println!("{}", "Recommendations:".bold());
        for recommendation in &response.recommendations {
            println!("  - {}", recommendation);
        }
    }
}
