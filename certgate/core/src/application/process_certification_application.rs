// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Process Certification Application Use Case
//!
//! Merges the local tier checks with the vendor testing suite's results into
//! a single score and verdict, then persists the application.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Orchestrate automated certification checks
//! - **Collaborators:**
//!   - Domain: CertificationApplication aggregate
//!   - Infrastructure: CertificationApplicationRepository, DeploymentRepository,
//!     VendorTestingSuite, EventBus
//!
//! The use case never returns `Err`: a missing application, a terminal
//! status, or a persistence failure all come back as a response with
//! `success == false`. Testing suite errors and timeouts are not failures;
//! they degrade to an empty result set and a manual-review recommendation.

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::application::locks::ApplicationLocks;
use crate::application::recommendations;
use crate::domain::certification::{
    ApplicationStatus, CertificationApplication, CertificationApplicationId, CertificationError,
};
use crate::domain::checks::CertificationChecks;
use crate::domain::config::TestingSuiteConfig;
use crate::domain::events::CertificationEvent;
use crate::domain::repository::{CertificationApplicationRepository, DeploymentRepository};
use crate::domain::testing_suite::{TestResult, TestRunConfig, TestType, VendorTestingSuite};
use crate::infrastructure::event_bus::EventBus;

/// Process request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessCertificationRequest {
    pub application_id: String,
}

/// Process response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessCertificationResponse {
    pub success: bool,
    pub application_id: String,
    pub passed: bool,
    pub score: u8,

    /// Absent only when the application could not be loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationStatus>,

    pub checks: CertificationChecks,
    pub recommendations: Vec<String>,

    /// Results keyed by test type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_results: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessCertificationResponse {
    fn from_application(application: &CertificationApplication, error: Option<String>) -> Self {
        Self {
            success: error.is_none(),
            application_id: application.id().to_string(),
            passed: application.automated_checks_passed(),
            score: application.score(),
            status: Some(application.status()),
            checks: application.checks().copied().unwrap_or_default(),
            recommendations: application.recommendations().to_vec(),
            test_results: format_test_results(application.test_results()),
            error,
        }
    }

    fn unloaded(application_id: &str, error: String) -> Self {
        Self {
            success: false,
            application_id: application_id.to_string(),
            passed: false,
            score: 0,
            status: None,
            checks: CertificationChecks::default(),
            recommendations: Vec::new(),
            test_results: None,
            error: Some(error),
        }
    }

    fn not_found(application_id: &str) -> Self {
        Self::unloaded(application_id, format!("Application not found: {}", application_id))
    }
}

/// Tunables for a processing run
#[derive(Debug, Clone, Copy)]
pub struct ProcessCertificationSettings {
    /// Wall-clock limit for the testing suite call, all retries included
    pub testing_timeout: Duration,
}

impl Default for ProcessCertificationSettings {
    fn default() -> Self {
        Self {
            testing_timeout: Duration::from_secs(300),
        }
    }
}

impl From<&TestingSuiteConfig> for ProcessCertificationSettings {
    fn from(config: &TestingSuiteConfig) -> Self {
        Self {
            testing_timeout: config.total_timeout(),
        }
    }
}

/// Process Certification Application Use Case
#[async_trait]
pub trait ProcessCertificationApplicationUseCase: Send + Sync {
    /// Run automated checks for one application and persist the verdict
    async fn execute(&self, request: ProcessCertificationRequest) -> ProcessCertificationResponse;
}

/// Standard implementation of ProcessCertificationApplicationUseCase
pub struct StandardProcessCertificationApplicationUseCase {
    application_repository: Arc<dyn CertificationApplicationRepository>,
    deployment_repository: Arc<dyn DeploymentRepository>,
    testing_suite: Arc<dyn VendorTestingSuite>,
    event_bus: Arc<EventBus>,
    locks: ApplicationLocks,
    settings: ProcessCertificationSettings,
}

impl StandardProcessCertificationApplicationUseCase {
    pub fn new(
        application_repository: Arc<dyn CertificationApplicationRepository>,
        deployment_repository: Arc<dyn DeploymentRepository>,
        testing_suite: Arc<dyn VendorTestingSuite>,
        event_bus: Arc<EventBus>,
        locks: ApplicationLocks,
        settings: ProcessCertificationSettings,
    ) -> Self {
        Self {
            application_repository,
            deployment_repository,
            testing_suite,
            event_bus,
            locks,
            settings,
        }
    }

    async fn process(&self, raw_id: &str) -> ProcessCertificationResponse {
        // Step 1: Resolve the id, take the application lock, load
        let Ok(id) = CertificationApplicationId::from_string(raw_id) else {
            warn!(application_id = raw_id, "Application id is not a valid UUID");
            return ProcessCertificationResponse::not_found(raw_id);
        };
        let _guard = self.locks.acquire(id).await;

        let application = match self.application_repository.find_by_id(id).await {
            Ok(Some(application)) => application,
            Ok(None) => {
                warn!(application_id = %id, "Application not found");
                return ProcessCertificationResponse::not_found(raw_id);
            }
            Err(e) => {
                error!(application_id = %id, error = %e, "Failed to load application");
                return ProcessCertificationResponse::unloaded(raw_id, format!("Failed to load application: {}", e));
            }
        };

        // Step 2: Decided applications are never re-scored
        if !application.can_be_processed() {
            let err = CertificationError::CannotProcess {
                status: application.status(),
            };
            warn!(application_id = %id, status = %application.status(), "Refusing to process decided application");
            return ProcessCertificationResponse::from_application(&application, Some(err.to_string()));
        }

        // Steps 3-8 work on a copy; the stored application is untouched on failure
        match self.run_checks(application.clone()).await {
            Ok((stored, event)) => {
                self.event_bus.publish_certification_event(event);
                info!(
                    application_id = %id,
                    passed = stored.automated_checks_passed(),
                    score = stored.score(),
                    status = %stored.status(),
                    "Automated certification checks completed"
                );
                ProcessCertificationResponse::from_application(&stored, None)
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!(application_id = %id, error = %message, "Automated certification checks failed");
                ProcessCertificationResponse::from_application(&application, Some(message))
            }
        }
    }

    async fn run_checks(
        &self,
        mut application: CertificationApplication,
    ) -> anyhow::Result<(CertificationApplication, CertificationEvent)> {
        let mut recommendations = Vec::new();

        // Step 3: Local checks
        let documentation_complete = application.is_documentation_complete();
        let compliance_statements_valid = application.are_compliance_statements_valid();

        let active_deployments = match self
            .deployment_repository
            .count_active_by_vendor_id(application.vendor_id())
            .await
        {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(
                    application_id = %application.id(),
                    vendor_id = application.vendor_id(),
                    error = %e,
                    "Failed to count active deployments; treating as zero"
                );
                None
            }
        };
        let deployment_history_valid = application.is_deployment_history_valid(active_deployments.unwrap_or(0));

        // Step 4: One recommendation per failing local check
        if !documentation_complete {
            recommendations.push(recommendations::documentation(&application));
        }
        if !compliance_statements_valid {
            recommendations.push(recommendations::compliance(&application));
        }
        if !deployment_history_valid {
            recommendations.push(recommendations::deployment_shortfall(
                &application,
                active_deployments.unwrap_or(0),
            ));
        }
        if active_deployments.is_none() {
            recommendations.push(recommendations::DEPLOYMENT_HISTORY_UNVERIFIED.to_string());
        }

        // Step 5: External test battery
        let test_results = self.run_testing_suite(&application).await;

        // Step 6: Fold results by test type
        let checks = CertificationChecks {
            documentation_complete,
            compliance_statements_valid,
            deployment_history_valid,
            phi_exposure_test: test_type_passed(&test_results, TestType::PhiExposure),
            clinical_accuracy_test: test_type_passed(&test_results, TestType::ClinicalAccuracy),
            bias_detection_test: test_type_passed(&test_results, TestType::BiasDetection),
            security_scan_test: test_type_passed(&test_results, TestType::SecurityScan),
        };
        recommendations.extend(test_recommendations(&test_results));

        // Step 7: Apply to the aggregate
        let event = application
            .process_automated_checks(checks, test_results, recommendations)
            .context("Failed to apply automated checks")?;

        // Step 8: Persist (version compare-and-swap)
        let stored = self
            .application_repository
            .save(&application)
            .await
            .context("Failed to persist certification application")?;

        Ok((stored, event))
    }

    async fn run_testing_suite(&self, application: &CertificationApplication) -> Vec<TestResult> {
        let config = TestRunConfig {
            application_id: application.id(),
            vendor_id: application.vendor_id().to_string(),
            api_endpoint: application.api_endpoint().map(str::to_string),
        };

        match tokio::time::timeout(self.settings.testing_timeout, self.testing_suite.run_all_tests(&config)).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                error!(application_id = %application.id(), error = %e, "Vendor testing suite failed");
                Vec::new()
            }
            Err(_) => {
                let timeout_ms = self.settings.testing_timeout.as_millis() as u64;
                error!(application_id = %application.id(), timeout_ms, "Vendor testing suite timed out");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl ProcessCertificationApplicationUseCase for StandardProcessCertificationApplicationUseCase {
    async fn execute(&self, request: ProcessCertificationRequest) -> ProcessCertificationResponse {
        let started = Instant::now();
        let response = self.process(&request.application_id).await;
        self.locks.prune();

        let outcome = match (response.success, response.passed) {
            (false, _) => "error",
            (true, true) => "passed",
            (true, false) => "failed",
        };
        metrics::counter!("certgate_applications_processed_total", "outcome" => outcome).increment(1);
        metrics::histogram!("certgate_processing_duration_seconds").record(started.elapsed().as_secs_f64());

        response
    }
}

/// A test type passes only if it reported at least once and every report passed
fn test_type_passed(results: &[TestResult], test_type: TestType) -> bool {
    let mut of_type = results.iter().filter(|r| r.test_type == test_type).peekable();
    of_type.peek().is_some() && of_type.all(|r| r.passed)
}

fn test_recommendations(results: &[TestResult]) -> Vec<String> {
    if results.is_empty() {
        return vec![recommendations::TESTING_SUITE_UNAVAILABLE.to_string()];
    }

    TestType::ALL
        .iter()
        .filter_map(|test_type| {
            let mut of_type = results.iter().filter(|r| r.test_type == *test_type);
            match of_type.clone().find(|r| !r.passed) {
                Some(failed) => Some(recommendations::failed_test(failed)),
                None if of_type.next().is_none() => Some(recommendations::missing_test_result(*test_type)),
                None => None,
            }
        })
        .collect()
}

/// Results as an object keyed by test type. When a type reported more than
/// once, the first failing report represents it.
fn format_test_results(results: &[TestResult]) -> Option<Value> {
    if results.is_empty() {
        return None;
    }

    let mut formatted = serde_json::Map::new();
    for test_type in TestType::ALL {
        let mut of_type = results.iter().filter(|r| r.test_type == test_type);
        let representative = of_type.clone().find(|r| !r.passed).or_else(|| of_type.next());
        if let Some(result) = representative {
            let mut entry = serde_json::json!({
                "passed": result.passed,
                "score": result.score,
            });
            if let Some(details) = &result.details {
                entry["details"] = details.clone();
            }
            if let Some(message) = &result.error_message {
                entry["error_message"] = Value::String(message.clone());
            }
            formatted.insert(test_type.as_str().to_string(), entry);
        }
    }
    Some(Value::Object(formatted))
}
