// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Submit Certification Application Use Case
//!
//! Creates a new application in PENDING, persists it, and publishes
//! `ApplicationCreated`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::application::error::CertificationUseCaseError;
use crate::domain::certification::CertificationApplication;
use crate::domain::compliance::ComplianceStatements;
use crate::domain::repository::CertificationApplicationRepository;
use crate::domain::tier::CertificationTier;
use crate::infrastructure::event_bus::EventBus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitCertificationRequest {
    pub vendor_id: String,
    pub tier: CertificationTier,
    #[serde(default)]
    pub documentation_urls: Vec<String>,
    #[serde(default)]
    pub compliance_statements: ComplianceStatements,
    #[serde(default)]
    pub api_endpoint: Option<String>,
}

#[async_trait]
pub trait SubmitCertificationApplicationUseCase: Send + Sync {
    async fn submit(&self, request: SubmitCertificationRequest) -> Result<CertificationApplication, CertificationUseCaseError>;
}

pub struct StandardSubmitCertificationApplicationUseCase {
    application_repository: Arc<dyn CertificationApplicationRepository>,
    event_bus: Arc<EventBus>,
}

impl StandardSubmitCertificationApplicationUseCase {
    pub fn new(application_repository: Arc<dyn CertificationApplicationRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            application_repository,
            event_bus,
        }
    }
}

#[async_trait]
impl SubmitCertificationApplicationUseCase for StandardSubmitCertificationApplicationUseCase {
    async fn submit(&self, request: SubmitCertificationRequest) -> Result<CertificationApplication, CertificationUseCaseError> {
        if request.documentation_urls.iter().any(|url| url.trim().is_empty()) {
            return Err(CertificationUseCaseError::Validation(
                "documentation URLs must not be blank".to_string(),
            ));
        }

        // Step 1: Create aggregate
        let (application, event) = CertificationApplication::create(
            request.vendor_id,
            request.tier,
            request.documentation_urls,
            request.compliance_statements,
            request.api_endpoint,
        )?;

        // Step 2: Persist
        let stored = self.application_repository.save(&application).await?;

        // Step 3: Publish
        self.event_bus.publish_certification_event(event);
        metrics::counter!("certgate_applications_submitted_total", "tier" => stored.tier_requested().as_str())
            .increment(1);
        info!(
            application_id = %stored.id(),
            vendor_id = stored.vendor_id(),
            tier = %stored.tier_requested(),
            "Certification application submitted"
        );

        Ok(stored)
    }
}
