// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Reviewer-facing recommendation text, one message per failing check.

use crate::domain::certification::CertificationApplication;
use crate::domain::test_details::{
    BiasDetectionDetails, BiasSeverity, ClinicalAccuracyDetails, PhiExposureDetails, SecurityScanDetails,
};
use crate::domain::testing_suite::{TestResult, TestType};

pub const TESTING_SUITE_UNAVAILABLE: &str =
    "Automated testing suite encountered errors - manual review required";

pub const DEPLOYMENT_HISTORY_UNVERIFIED: &str =
    "Unable to verify deployment history - manual review required";

pub fn documentation(application: &CertificationApplication) -> String {
    format!(
        "Please upload all required documentation ({} document(s) required for {} tier, {} provided)",
        application.get_documentation_requirement(),
        application.tier_requested().label(),
        application.documentation_urls().len()
    )
}

pub fn compliance(application: &CertificationApplication) -> String {
    let tier = application.tier_requested();
    format!(
        "Compliance statements do not meet {} tier requirements: {} required",
        tier.label(),
        tier.compliance_requirement()
    )
}

pub fn deployment_shortfall(application: &CertificationApplication, active_deployments: u32) -> String {
    format!(
        "{} tier requires at least {} active deployment(s); {} currently active",
        application.tier_requested().label(),
        application.get_deployment_requirement(),
        active_deployments
    )
}

pub fn missing_test_result(test_type: TestType) -> String {
    format!("No {} result reported by the testing suite - manual review required", test_type)
}

/// Specific message for a failed test, falling back to generic wording when
/// the details carry no usable evidence
pub fn failed_test(result: &TestResult) -> String {
    let details = result.details.as_ref();
    let fallback = |generic: &str| match &result.error_message {
        Some(message) => format!("{}: {}", generic, message),
        None => generic.to_string(),
    };

    match result.test_type {
        TestType::PhiExposure => match PhiExposureDetails::from_details(details).violation_count() {
            Some(count) => format!("PHI exposure test failed: {} violation(s) detected", count),
            None => fallback("PHI exposure test failed"),
        },
        TestType::ClinicalAccuracy => {
            let threshold = ClinicalAccuracyDetails::from_details(details).threshold();
            format!(
                "Clinical accuracy test failed: score {} below required threshold of {}",
                result.score, threshold
            )
        }
        TestType::BiasDetection => {
            let bias = BiasDetectionDetails::from_details(details);
            let groups = bias.affected_groups();
            let mut message = if groups.is_empty() {
                "Bias detection test failed: disparities found for one or more demographic groups".to_string()
            } else {
                format!("Bias detection test failed: disparities found for {}", groups.join(", "))
            };

            let severity = bias
                .severity
                .or_else(|| bias.assessment().map(|a| a.severity))
                .filter(|s| *s != BiasSeverity::None);
            if let Some(severity) = severity {
                message.push_str(&format!(" ({} severity)", severity.as_str()));
            }
            message
        }
        TestType::SecurityScan => match SecurityScanDetails::from_details(details).vulnerability_count() {
            Some(count) => format!("Security scan failed: {} vulnerability(ies) found", count),
            None => fallback("Security scan failed"),
        },
    }
}
