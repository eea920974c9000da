// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Retrying Testing Suite Decorator
//
// Bounded retry with exponential backoff (retry_delay_ms * 2^attempt) at the
// collaborator boundary. Only errors are retried; an empty successful run is
// returned as is.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::domain::testing_suite::{TestResult, TestRunConfig, TestSuiteError, VendorTestingSuite};

pub struct RetryingVendorTestingSuite {
    inner: Arc<dyn VendorTestingSuite>,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RetryingVendorTestingSuite {
    /// `max_retries` is the total number of attempts; 0 is treated as 1
    pub fn new(inner: Arc<dyn VendorTestingSuite>, max_retries: u32, retry_delay_ms: u64) -> Self {
        Self {
            inner,
            max_retries: max_retries.max(1),
            retry_delay_ms,
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(2_u64.saturating_pow(attempt)))
    }
}

#[async_trait]
impl VendorTestingSuite for RetryingVendorTestingSuite {
    async fn run_all_tests(&self, config: &TestRunConfig) -> Result<Vec<TestResult>, TestSuiteError> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            match self.inner.run_all_tests(config).await {
                Ok(results) => {
                    metrics::counter!("certgate_testing_suite_attempts_total", "outcome" => "success").increment(1);
                    if attempt > 0 {
                        info!(application_id = %config.application_id, "Testing suite succeeded on attempt {}", attempt + 1);
                    }
                    return Ok(results);
                }
                Err(e) => {
                    metrics::counter!("certgate_testing_suite_attempts_total", "outcome" => "error").increment(1);
                    warn!(
                        application_id = %config.application_id,
                        "Testing suite failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.max_retries,
                        e
                    );
                    last_error = Some(e);

                    if attempt + 1 < self.max_retries {
                        tokio::time::sleep(self.backoff(attempt)).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| TestSuiteError::Provider("Unknown error".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::certification::CertificationApplicationId;
    use crate::domain::testing_suite::TestType;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakySuite {
        calls: AtomicU32,
        failures_before_success: u32,
        results: Vec<TestResult>,
    }

    #[async_trait]
    impl VendorTestingSuite for FlakySuite {
        async fn run_all_tests(&self, _config: &TestRunConfig) -> Result<Vec<TestResult>, TestSuiteError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                Err(TestSuiteError::Network("connection reset".to_string()))
            } else {
                Ok(self.results.clone())
            }
        }
    }

    fn flaky(failures_before_success: u32, results: Vec<TestResult>) -> Arc<FlakySuite> {
        Arc::new(FlakySuite {
            calls: AtomicU32::new(0),
            failures_before_success,
            results,
        })
    }

    fn run_config() -> TestRunConfig {
        TestRunConfig {
            application_id: CertificationApplicationId::new(),
            vendor_id: "vendor-1".to_string(),
            api_endpoint: None,
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let inner = flaky(2, vec![TestResult::new(TestType::SecurityScan, true, 100.0)]);
        let suite = RetryingVendorTestingSuite::new(inner.clone(), 3, 1);

        let results = suite.run_all_tests(&run_config()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let inner = flaky(u32::MAX, vec![]);
        let suite = RetryingVendorTestingSuite::new(inner.clone(), 3, 1);

        let err = suite.run_all_tests(&run_config()).await.unwrap_err();
        assert!(matches!(err, TestSuiteError::Network(_)));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_success_is_not_retried() {
        let inner = flaky(0, vec![]);
        let suite = RetryingVendorTestingSuite::new(inner.clone(), 5, 1);

        assert!(suite.run_all_tests(&run_config()).await.unwrap().is_empty());
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_backoff_doubles() {
        let suite = RetryingVendorTestingSuite::new(flaky(0, vec![]), 0, 100);
        assert_eq!(suite.max_retries, 1);
        assert_eq!(suite.backoff(0), Duration::from_millis(100));
        assert_eq!(suite.backoff(1), Duration::from_millis(200));
        assert_eq!(suite.backoff(3), Duration::from_millis(800));
    }
}
