// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! In-process service wiring
//!
//! Builds repositories, the testing suite adapter, the event bus and the
//! three use cases from a loaded configuration. Every command runs against
//! one `CertgateServices` instance.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use certgate_core::application::repository_factory::{build_repositories, CertificationRepositories};
use certgate_core::application::{
    ApplicationLocks, ProcessCertificationApplicationUseCase, ProcessCertificationSettings,
    ReviewCertificationApplicationUseCase, StandardProcessCertificationApplicationUseCase,
    StandardReviewCertificationApplicationUseCase, StandardSubmitCertificationApplicationUseCase,
    SubmitCertificationApplicationUseCase,
};
use certgate_core::domain::config::CertgateConfig;
use certgate_core::domain::repository::StorageBackend;
use certgate_core::infrastructure::event_bus::EventBus;
use certgate_core::infrastructure::testing_suite::build_testing_suite;

pub struct CertgateServices {
    pub config: CertgateConfig,
    pub repositories: CertificationRepositories,
    pub event_bus: Arc<EventBus>,
    pub submit: Arc<dyn SubmitCertificationApplicationUseCase>,
    pub process: Arc<dyn ProcessCertificationApplicationUseCase>,
    pub review: Arc<dyn ReviewCertificationApplicationUseCase>,
}

impl CertgateServices {
    /// Load configuration (explicit path, discovery, or defaults) and wire services
    pub async fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config = CertgateConfig::load_or_default(config_path).context("Failed to load configuration")?;
        Self::from_config(config).await
    }

    pub async fn from_config(config: CertgateConfig) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let backend = config.storage_backend()?;
        if matches!(backend, StorageBackend::InMemory) {
            warn!("In-memory storage is per-process; applications are lost when this command exits");
        }
        let repositories = build_repositories(&backend).await?;

        let testing_suite =
            build_testing_suite(&config.testing_suite).context("Failed to initialize vendor testing suite")?;
        let event_bus = Arc::new(EventBus::new(config.event_bus.capacity));
        let locks = ApplicationLocks::new();

        let submit = Arc::new(StandardSubmitCertificationApplicationUseCase::new(
            repositories.applications.clone(),
            event_bus.clone(),
        ));
        let process = Arc::new(StandardProcessCertificationApplicationUseCase::new(
            repositories.applications.clone(),
            repositories.deployments.clone(),
            testing_suite,
            event_bus.clone(),
            locks.clone(),
            ProcessCertificationSettings::from(&config.testing_suite),
        ));
        let review = Arc::new(StandardReviewCertificationApplicationUseCase::new(
            repositories.applications.clone(),
            event_bus.clone(),
            locks,
        ));

        Ok(Self {
            config,
            repositories,
            event_bus,
            submit,
            process,
            review,
        })
    }
}
