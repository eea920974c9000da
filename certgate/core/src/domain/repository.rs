// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for the certification context. Interfaces are
//! defined here and implemented in `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `CertificationApplicationRepository` | `CertificationApplication` | `InMemoryCertificationApplicationRepository`, `PostgresCertificationApplicationRepository` |
//! | `DeploymentRepository` | `Deployment` | `InMemoryDeploymentRepository`, `PostgresDeploymentRepository` |
//!
//! ## Optimistic Concurrency
//!
//! `CertificationApplicationRepository::save` compares the aggregate's
//! `version` with the stored one. A mismatch fails with
//! `RepositoryError::VersionConflict`; a match stores the aggregate with
//! `version + 1` and returns the stored copy.

use async_trait::async_trait;

use crate::domain::certification::{ApplicationStatus, CertificationApplication, CertificationApplicationId};
use crate::domain::deployment::Deployment;

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connection_string: String,
    pub max_connections: u32,
}

/// Repository interface for CertificationApplication aggregates
#[async_trait]
pub trait CertificationApplicationRepository: Send + Sync {
    /// Upsert by id with a version compare-and-swap
    async fn save(&self, application: &CertificationApplication) -> Result<CertificationApplication, RepositoryError>;

    async fn find_by_id(&self, id: CertificationApplicationId) -> Result<Option<CertificationApplication>, RepositoryError>;

    /// Applications for a vendor, oldest first
    async fn find_by_vendor_id(&self, vendor_id: &str) -> Result<Vec<CertificationApplication>, RepositoryError>;

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<CertificationApplication>, RepositoryError>;

    async fn exists(&self, id: CertificationApplicationId) -> Result<bool, RepositoryError>;

    /// List every application, oldest first
    async fn list_all(&self) -> Result<Vec<CertificationApplication>, RepositoryError>;
}

/// Repository interface for vendor deployments
#[async_trait]
pub trait DeploymentRepository: Send + Sync {
    async fn save(&self, deployment: &Deployment) -> Result<(), RepositoryError>;

    async fn find_by_vendor_id(&self, vendor_id: &str) -> Result<Vec<Deployment>, RepositoryError>;

    /// Number of the vendor's deployments with status `active`
    async fn count_active_by_vendor_id(&self, vendor_id: &str) -> Result<u32, RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Version conflict for {id}: expected {expected}, found {actual}")]
    VersionConflict { id: String, expected: u64, actual: u64 },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
