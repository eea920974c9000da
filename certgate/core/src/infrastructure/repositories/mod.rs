// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository ports defined in
//! `crate::domain::repository`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve certification aggregates
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! - **PostgresCertificationApplicationRepository** - applications, JSONB for structured fields
//! - **PostgresDeploymentRepository** - vendor deployments
//!
//! ## In-Memory Repositories
//!
//! Thread-safe HashMap-backed storage for tests and local runs:
//! - **InMemoryCertificationApplicationRepository**
//! - **InMemoryDeploymentRepository**
//!
//! Both application repositories enforce the same version compare-and-swap.

pub mod postgres_certification;
pub mod postgres_deployment;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::certification::{ApplicationStatus, CertificationApplication, CertificationApplicationId};
use crate::domain::deployment::{Deployment, DeploymentId};
use crate::domain::repository::{CertificationApplicationRepository, DeploymentRepository, RepositoryError};

pub use postgres_certification::PostgresCertificationApplicationRepository;
pub use postgres_deployment::PostgresDeploymentRepository;

fn read_guard<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, RepositoryError> {
    lock.read()
        .map_err(|_| RepositoryError::Unknown("in-memory store lock poisoned".to_string()))
}

fn write_guard<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, RepositoryError> {
    lock.write()
        .map_err(|_| RepositoryError::Unknown("in-memory store lock poisoned".to_string()))
}

fn oldest_first(mut applications: Vec<CertificationApplication>) -> Vec<CertificationApplication> {
    applications.sort_by_key(|a| a.created_at());
    applications
}

#[derive(Clone, Default)]
pub struct InMemoryCertificationApplicationRepository {
    applications: Arc<RwLock<HashMap<CertificationApplicationId, CertificationApplication>>>,
}

impl InMemoryCertificationApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificationApplicationRepository for InMemoryCertificationApplicationRepository {
    async fn save(&self, application: &CertificationApplication) -> Result<CertificationApplication, RepositoryError> {
        let mut applications = write_guard(&self.applications)?;

        let stored_version = applications.get(&application.id()).map(|a| a.version()).unwrap_or(0);
        if stored_version != application.version() {
            return Err(RepositoryError::VersionConflict {
                id: application.id().to_string(),
                expected: application.version(),
                actual: stored_version,
            });
        }

        let mut snapshot = application.snapshot();
        snapshot.version += 1;
        let stored = CertificationApplication::reconstitute(snapshot);
        applications.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CertificationApplicationId) -> Result<Option<CertificationApplication>, RepositoryError> {
        Ok(read_guard(&self.applications)?.get(&id).cloned())
    }

    async fn find_by_vendor_id(&self, vendor_id: &str) -> Result<Vec<CertificationApplication>, RepositoryError> {
        let applications = read_guard(&self.applications)?;
        Ok(oldest_first(
            applications
                .values()
                .filter(|a| a.vendor_id() == vendor_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<CertificationApplication>, RepositoryError> {
        let applications = read_guard(&self.applications)?;
        Ok(oldest_first(
            applications
                .values()
                .filter(|a| a.status() == status)
                .cloned()
                .collect(),
        ))
    }

    async fn exists(&self, id: CertificationApplicationId) -> Result<bool, RepositoryError> {
        Ok(read_guard(&self.applications)?.contains_key(&id))
    }

    async fn list_all(&self) -> Result<Vec<CertificationApplication>, RepositoryError> {
        let applications = read_guard(&self.applications)?;
        Ok(oldest_first(applications.values().cloned().collect()))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryDeploymentRepository {
    deployments: Arc<RwLock<HashMap<DeploymentId, Deployment>>>,
}

impl InMemoryDeploymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeploymentRepository for InMemoryDeploymentRepository {
    async fn save(&self, deployment: &Deployment) -> Result<(), RepositoryError> {
        write_guard(&self.deployments)?.insert(deployment.id, deployment.clone());
        Ok(())
    }

    async fn find_by_vendor_id(&self, vendor_id: &str) -> Result<Vec<Deployment>, RepositoryError> {
        let deployments = read_guard(&self.deployments)?;
        let mut found: Vec<Deployment> = deployments
            .values()
            .filter(|d| d.vendor_id == vendor_id)
            .cloned()
            .collect();
        found.sort_by_key(|d| d.started_at);
        Ok(found)
    }

    async fn count_active_by_vendor_id(&self, vendor_id: &str) -> Result<u32, RepositoryError> {
        let deployments = read_guard(&self.deployments)?;
        let count = deployments
            .values()
            .filter(|d| d.vendor_id == vendor_id && d.is_active())
            .count();
        Ok(count as u32)
    }
}
