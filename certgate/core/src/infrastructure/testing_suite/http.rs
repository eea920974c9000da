// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// HTTP Vendor Testing Suite Adapter
//
// Anti-Corruption Layer for the remote testing service. Posts the run
// config to `{endpoint}/api/v1/test-runs` and maps the `results` array onto
// domain `TestResult`s. Result entries with an unknown test type are dropped.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::testing_suite::{TestResult, TestRunConfig, TestSuiteError, TestType, VendorTestingSuite};

pub struct HttpVendorTestingSuite {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    request_timeout: Duration,
}

#[derive(Deserialize)]
struct TestRunResponse {
    #[serde(default)]
    results: Vec<RawTestResult>,
}

#[derive(Deserialize)]
struct RawTestResult {
    #[serde(alias = "testType")]
    test_type: String,
    passed: bool,
    #[serde(default)]
    score: f64,
    #[serde(default)]
    details: Option<Value>,
    #[serde(default, alias = "errorMessage")]
    error_message: Option<String>,
}

impl HttpVendorTestingSuite {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, request_timeout: Duration) -> Result<Self, TestSuiteError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TestSuiteError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            request_timeout,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> TestSuiteError {
        if err.is_timeout() {
            TestSuiteError::Timeout(self.request_timeout.as_millis() as u64)
        } else {
            TestSuiteError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl VendorTestingSuite for HttpVendorTestingSuite {
    async fn run_all_tests(&self, config: &TestRunConfig) -> Result<Vec<TestResult>, TestSuiteError> {
        let url = format!("{}/api/v1/test-runs", self.endpoint.trim_end_matches('/'));
        debug!(application_id = %config.application_id, url = %url, "Requesting vendor test run");

        let mut request = self.client.post(&url).json(config);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TestSuiteError::Provider(format!("HTTP {}: {}", status, error_text)));
        }

        let body: TestRunResponse = response
            .json()
            .await
            .map_err(|e| TestSuiteError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let results = body
            .results
            .into_iter()
            .filter_map(|raw| match raw.test_type.parse::<TestType>() {
                Ok(test_type) => Some(TestResult {
                    test_type,
                    passed: raw.passed,
                    score: raw.score,
                    details: raw.details,
                    error_message: raw.error_message,
                }),
                Err(_) => {
                    warn!(test_type = %raw.test_type, "Ignoring result with unknown test type");
                    None
                }
            })
            .collect();

        Ok(results)
    }
}
