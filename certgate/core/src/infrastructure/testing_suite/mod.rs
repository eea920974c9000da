// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Vendor testing suite adapters.
//!
//! `build_testing_suite` wires the configured adapter: the HTTP client
//! wrapped in the retry decorator, or `UnconfiguredTestingSuite` when no
//! endpoint is set.

pub mod http;
pub mod retry;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::domain::config::{ConfigError, TestingSuiteConfig};
use crate::domain::testing_suite::{TestResult, TestRunConfig, TestSuiteError, VendorTestingSuite};

pub use http::HttpVendorTestingSuite;
pub use retry::RetryingVendorTestingSuite;

/// Always fails, sending every application to manual review
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredTestingSuite;

#[async_trait]
impl VendorTestingSuite for UnconfiguredTestingSuite {
    async fn run_all_tests(&self, _config: &TestRunConfig) -> Result<Vec<TestResult>, TestSuiteError> {
        Err(TestSuiteError::NotConfigured)
    }
}

pub fn build_testing_suite(config: &TestingSuiteConfig) -> Result<Arc<dyn VendorTestingSuite>, ConfigError> {
    let Some(endpoint) = config.endpoint.as_deref() else {
        warn!("No testing suite endpoint configured; automated tests will require manual review");
        return Ok(Arc::new(UnconfiguredTestingSuite));
    };

    let http = HttpVendorTestingSuite::new(endpoint, config.resolved_api_key()?, config.timeout())
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    Ok(Arc::new(RetryingVendorTestingSuite::new(
        Arc::new(http),
        config.max_retries,
        config.retry_delay_ms,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::certification::CertificationApplicationId;

    #[tokio::test]
    async fn test_missing_endpoint_builds_unconfigured_suite() {
        let suite = build_testing_suite(&TestingSuiteConfig::default()).unwrap();
        let config = TestRunConfig {
            application_id: CertificationApplicationId::new(),
            vendor_id: "vendor-1".to_string(),
            api_endpoint: None,
        };

        let err = suite.run_all_tests(&config).await.unwrap_err();
        assert!(matches!(err, TestSuiteError::NotConfigured));
    }

    #[test]
    fn test_unresolvable_api_key_fails_wiring() {
        let config = TestingSuiteConfig {
            endpoint: Some("http://localhost:8080".to_string()),
            api_key: Some("env:CERTGATE_TEST_MISSING_SUITE_KEY_4D2E".to_string()),
            ..TestingSuiteConfig::default()
        };
        assert!(matches!(build_testing_suite(&config), Err(ConfigError::MissingEnvVar(_))));
    }
}
