// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Review Certification Application Use Case
//!
//! Human reviewer decisions. Shares the per-application locks with the
//! processing use case so a decision never interleaves with a check run.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::error::CertificationUseCaseError;
use crate::application::locks::ApplicationLocks;
use crate::domain::certification::{CertificationApplication, CertificationApplicationId, CertificationError};
use crate::domain::events::CertificationEvent;
use crate::domain::repository::CertificationApplicationRepository;
use crate::infrastructure::event_bus::EventBus;

#[async_trait]
pub trait ReviewCertificationApplicationUseCase: Send + Sync {
    async fn approve(&self, application_id: &str) -> Result<CertificationApplication, CertificationUseCaseError>;

    async fn reject(&self, application_id: &str, reason: &str) -> Result<CertificationApplication, CertificationUseCaseError>;
}

pub struct StandardReviewCertificationApplicationUseCase {
    application_repository: Arc<dyn CertificationApplicationRepository>,
    event_bus: Arc<EventBus>,
    locks: ApplicationLocks,
}

impl StandardReviewCertificationApplicationUseCase {
    pub fn new(
        application_repository: Arc<dyn CertificationApplicationRepository>,
        event_bus: Arc<EventBus>,
        locks: ApplicationLocks,
    ) -> Self {
        Self {
            application_repository,
            event_bus,
            locks,
        }
    }

    async fn decide<F>(&self, application_id: &str, command: F) -> Result<CertificationApplication, CertificationUseCaseError>
    where
        F: FnOnce(&mut CertificationApplication) -> Result<CertificationEvent, CertificationError> + Send,
    {
        let id = CertificationApplicationId::from_string(application_id)
            .map_err(|_| CertificationUseCaseError::NotFound(application_id.to_string()))?;

        let result = self.decide_locked(id, application_id, command).await;
        self.locks.prune();
        result
    }

    async fn decide_locked<F>(
        &self,
        id: CertificationApplicationId,
        application_id: &str,
        command: F,
    ) -> Result<CertificationApplication, CertificationUseCaseError>
    where
        F: FnOnce(&mut CertificationApplication) -> Result<CertificationEvent, CertificationError> + Send,
    {
        let _guard = self.locks.acquire(id).await;

        let mut application = self
            .application_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CertificationUseCaseError::NotFound(application_id.to_string()))?;

        let event = command(&mut application)?;
        let stored = self.application_repository.save(&application).await?;

        info!(application_id = %id, event = event.event_type(), status = %stored.status(), "Review decision recorded");
        self.event_bus.publish_certification_event(event);
        Ok(stored)
    }
}

#[async_trait]
impl ReviewCertificationApplicationUseCase for StandardReviewCertificationApplicationUseCase {
    async fn approve(&self, application_id: &str) -> Result<CertificationApplication, CertificationUseCaseError> {
        self.decide(application_id, |application| application.approve()).await
    }

    async fn reject(&self, application_id: &str, reason: &str) -> Result<CertificationApplication, CertificationUseCaseError> {
        if reason.trim().is_empty() {
            return Err(CertificationUseCaseError::Validation(
                "a rejection reason is required".to_string(),
            ));
        }
        let reason = reason.to_string();
        self.decide(application_id, move |application| application.reject(reason)).await
    }
}
