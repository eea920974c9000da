// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Retry behaviour of the configured HTTP testing suite under the process
//! use case's wall-clock limit.
//!
//! A local TCP server stalls its first connection and answers every later
//! one with four passing results, so only a retried run can score in full.

use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use certgate_core::application::recommendations::TESTING_SUITE_UNAVAILABLE;
use certgate_core::application::{
    ApplicationLocks, ProcessCertificationApplicationUseCase, ProcessCertificationRequest,
    ProcessCertificationSettings, StandardProcessCertificationApplicationUseCase,
};
use certgate_core::domain::certification::{ApplicationStatus, CertificationApplication, CertificationApplicationId};
use certgate_core::domain::compliance::ComplianceStatements;
use certgate_core::domain::config::TestingSuiteConfig;
use certgate_core::domain::repository::CertificationApplicationRepository;
use certgate_core::domain::testing_suite::{TestRunConfig, VendorTestingSuite};
use certgate_core::domain::tier::CertificationTier;
use certgate_core::infrastructure::event_bus::EventBus;
use certgate_core::infrastructure::repositories::{
    InMemoryCertificationApplicationRepository, InMemoryDeploymentRepository,
};
use certgate_core::infrastructure::testing_suite::build_testing_suite;

/// Test service whose first connection never gets a response
struct StallingFirstServer {
    addr: SocketAddr,
    connections: Arc<AtomicUsize>,
}

impl StallingFirstServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));

        let counter = connections.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    if seen == 0 {
                        // Hold the socket open without answering
                        let _held = socket;
                        tokio::time::sleep(Duration::from_secs(60)).await;
                    } else {
                        respond_with_passing_results(socket).await;
                    }
                });
            }
        });

        Self { addr, connections }
    }

    fn config(&self, timeout_seconds: u64, max_retries: u32) -> TestingSuiteConfig {
        TestingSuiteConfig {
            endpoint: Some(format!("http://{}", self.addr)),
            timeout_seconds,
            max_retries,
            retry_delay_ms: 10,
            ..TestingSuiteConfig::default()
        }
    }

    fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

async fn respond_with_passing_results(mut socket: TcpStream) {
    let mut request = Vec::new();
    let mut chunk = [0_u8; 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        request.extend_from_slice(&chunk[..n]);
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while request.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
    }

    let body = json!({
        "results": [
            {"test_type": "phi_exposure", "passed": true, "score": 100.0},
            {"test_type": "clinical_accuracy", "passed": true, "score": 95.0},
            {"test_type": "bias_detection", "passed": true, "score": 100.0},
            {"test_type": "security_scan", "passed": true, "score": 100.0}
        ]
    })
    .to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.ok();
}

async fn submit_basic(applications: &InMemoryCertificationApplicationRepository) -> CertificationApplication {
    let (application, _) = CertificationApplication::create(
        "vendor-123",
        CertificationTier::Basic,
        vec!["https://docs.vendor.test/overview.pdf".to_string()],
        ComplianceStatements::from_json(&json!({"hipaa": true})),
        Some("https://api.vendor.test".to_string()),
    )
    .unwrap();
    applications.save(&application).await.unwrap()
}

fn use_case_for(
    config: &TestingSuiteConfig,
    applications: Arc<InMemoryCertificationApplicationRepository>,
) -> StandardProcessCertificationApplicationUseCase {
    StandardProcessCertificationApplicationUseCase::new(
        applications,
        Arc::new(InMemoryDeploymentRepository::new()),
        build_testing_suite(config).unwrap(),
        Arc::new(EventBus::new(16)),
        ApplicationLocks::new(),
        ProcessCertificationSettings::from(config),
    )
}

#[tokio::test]
async fn test_configured_suite_retries_after_stalled_attempt() {
    let server = StallingFirstServer::start().await;
    let suite = build_testing_suite(&server.config(1, 3)).unwrap();

    let results = suite
        .run_all_tests(&TestRunConfig {
            application_id: CertificationApplicationId::new(),
            vendor_id: "vendor-123".to_string(),
            api_endpoint: None,
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(server.connections(), 2);
}

#[tokio::test]
async fn test_processing_limit_leaves_room_for_retries() {
    let server = StallingFirstServer::start().await;
    let config = server.config(1, 3);
    let applications = Arc::new(InMemoryCertificationApplicationRepository::new());
    let app = submit_basic(&applications).await;

    let response = use_case_for(&config, applications.clone())
        .execute(ProcessCertificationRequest {
            application_id: app.id().to_string(),
        })
        .await;

    assert!(response.success);
    assert!(response.passed);
    assert_eq!(response.score, 100);
    assert_eq!(response.status, Some(ApplicationStatus::InReview));
    assert!(!response.recommendations.iter().any(|r| r == TESTING_SUITE_UNAVAILABLE));
    assert!(server.connections() >= 2);

    let stored = applications.find_by_id(app.id()).await.unwrap().unwrap();
    assert_eq!(stored.score(), 100);
}

#[tokio::test]
async fn test_single_attempt_stall_degrades_to_manual_review() {
    let server = StallingFirstServer::start().await;
    let config = server.config(1, 1);
    let applications = Arc::new(InMemoryCertificationApplicationRepository::new());
    let app = submit_basic(&applications).await;

    let response = use_case_for(&config, applications)
        .execute(ProcessCertificationRequest {
            application_id: app.id().to_string(),
        })
        .await;

    assert!(response.success);
    assert!(!response.passed);
    assert!(response.recommendations.iter().any(|r| r == TESTING_SUITE_UNAVAILABLE));
    assert_eq!(server.connections(), 1);
}
