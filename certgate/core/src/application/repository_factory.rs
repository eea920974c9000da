// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates concrete repository implementations from the configured storage
//! backend, keeping the domain layer free of infrastructure types.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Wire repository ports to adapters

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use crate::domain::repository::{CertificationApplicationRepository, DeploymentRepository, StorageBackend};
use crate::infrastructure::db::Database;
use crate::infrastructure::repositories::{
    InMemoryCertificationApplicationRepository, InMemoryDeploymentRepository,
    PostgresCertificationApplicationRepository, PostgresDeploymentRepository,
};

/// Creates a CertificationApplicationRepository for the configured backend.
/// `pool` is only consulted for PostgreSQL.
pub fn create_application_repository(
    backend: &StorageBackend,
    pool: Option<PgPool>,
) -> Result<Arc<dyn CertificationApplicationRepository>> {
    match (backend, pool) {
        (StorageBackend::InMemory, _) => Ok(Arc::new(InMemoryCertificationApplicationRepository::new())),
        (StorageBackend::PostgreSQL(_), Some(pool)) => Ok(Arc::new(PostgresCertificationApplicationRepository::new(pool))),
        (StorageBackend::PostgreSQL(_), None) => anyhow::bail!("PostgreSQL backend requires a connection pool"),
    }
}

/// Creates a DeploymentRepository for the configured backend
pub fn create_deployment_repository(
    backend: &StorageBackend,
    pool: Option<PgPool>,
) -> Result<Arc<dyn DeploymentRepository>> {
    match (backend, pool) {
        (StorageBackend::InMemory, _) => Ok(Arc::new(InMemoryDeploymentRepository::new())),
        (StorageBackend::PostgreSQL(_), Some(pool)) => Ok(Arc::new(PostgresDeploymentRepository::new(pool))),
        (StorageBackend::PostgreSQL(_), None) => anyhow::bail!("PostgreSQL backend requires a connection pool"),
    }
}

/// Both repositories of the certification context
#[derive(Clone)]
pub struct CertificationRepositories {
    pub applications: Arc<dyn CertificationApplicationRepository>,
    pub deployments: Arc<dyn DeploymentRepository>,
}

/// Connect (and migrate, for PostgreSQL) and build every repository
pub async fn build_repositories(backend: &StorageBackend) -> Result<CertificationRepositories> {
    let pool = match backend {
        StorageBackend::InMemory => {
            info!("Using in-memory storage backend");
            None
        }
        StorageBackend::PostgreSQL(config) => {
            let database = Database::new(config).await?;
            database.migrate().await?;
            info!("Connected to PostgreSQL storage backend");
            Some(database.get_pool().clone())
        }
    };

    Ok(CertificationRepositories {
        applications: create_application_repository(backend, pool.clone())?,
        deployments: create_deployment_repository(backend, pool)?,
    })
}
