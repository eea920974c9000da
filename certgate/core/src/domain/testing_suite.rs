// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Vendor Testing Suite Port
//!
//! Domain interface for the external battery of safety and quality tests run
//! against a vendor's system. Adapters live in
//! `crate::infrastructure::testing_suite`.
//!
//! Errors and timeouts are treated like an empty result set: no automated
//! evidence, so the application goes to manual review.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::domain::certification::CertificationApplicationId;

/// The four automated tests whose results feed the certification checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    PhiExposure,
    ClinicalAccuracy,
    BiasDetection,
    SecurityScan,
}

impl TestType {
    pub const ALL: [TestType; 4] = [
        TestType::PhiExposure,
        TestType::ClinicalAccuracy,
        TestType::BiasDetection,
        TestType::SecurityScan,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TestType::PhiExposure => "phi_exposure",
            TestType::ClinicalAccuracy => "clinical_accuracy",
            TestType::BiasDetection => "bias_detection",
            TestType::SecurityScan => "security_scan",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = TestSuiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "phi_exposure" => Ok(TestType::PhiExposure),
            "clinical_accuracy" => Ok(TestType::ClinicalAccuracy),
            "bias_detection" => Ok(TestType::BiasDetection),
            "security_scan" => Ok(TestType::SecurityScan),
            _ => Err(TestSuiteError::InvalidResponse(format!("Unknown test type: {}", s))),
        }
    }
}

/// Outcome of a single automated test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(alias = "testType")]
    pub test_type: TestType,

    pub passed: bool,

    /// Score reported by the test (0 - 100)
    pub score: f64,

    /// Test-specific diagnostics (see `crate::domain::test_details`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    #[serde(default, alias = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TestResult {
    pub fn new(test_type: TestType, passed: bool, score: f64) -> Self {
        Self {
            test_type,
            passed,
            score,
            details: None,
            error_message: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// Parameters for a test run against a vendor's system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunConfig {
    pub application_id: CertificationApplicationId,
    pub vendor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

/// Domain interface for the vendor testing battery
#[async_trait]
pub trait VendorTestingSuite: Send + Sync {
    /// Run every automated test against the vendor's system
    async fn run_all_tests(&self, config: &TestRunConfig) -> Result<Vec<TestResult>, TestSuiteError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TestSuiteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Testing suite timed out after {0} ms")]
    Timeout(u64),

    #[error("Invalid response from testing suite: {0}")]
    InvalidResponse(String),

    #[error("Testing suite error: {0}")]
    Provider(String),

    #[error("Testing suite is not configured")]
    NotConfigured,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_test_type_parsing() {
        assert_eq!("phi_exposure".parse::<TestType>().unwrap(), TestType::PhiExposure);
        assert_eq!("Security-Scan".parse::<TestType>().unwrap(), TestType::SecurityScan);
        assert!("load_test".parse::<TestType>().is_err());
    }

    #[test]
    fn test_result_accepts_camel_case_fields() {
        let result: TestResult = serde_json::from_value(json!({
            "testType": "clinical_accuracy",
            "passed": false,
            "score": 72.5,
            "errorMessage": "below threshold"
        }))
        .unwrap();

        assert_eq!(result.test_type, TestType::ClinicalAccuracy);
        assert_eq!(result.error_message.as_deref(), Some("below threshold"));
        assert!(result.details.is_none());
    }
}
