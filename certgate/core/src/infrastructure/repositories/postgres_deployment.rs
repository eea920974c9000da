// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Deployment
//!
//! PostgreSQL adapter for `DeploymentRepository` (`vendor_deployments` table).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::deployment::{Deployment, DeploymentId, DeploymentStatus};
use crate::domain::repository::{DeploymentRepository, RepositoryError};

pub struct PostgresDeploymentRepository {
    pool: PgPool,
}

impl PostgresDeploymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeploymentRepository for PostgresDeploymentRepository {
    async fn save(&self, deployment: &Deployment) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO vendor_deployments (id, vendor_id, health_system, status, started_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                health_system = EXCLUDED.health_system,
                status = EXCLUDED.status,
                started_at = EXCLUDED.started_at
            "#,
        )
        .bind(deployment.id.0)
        .bind(&deployment.vendor_id)
        .bind(&deployment.health_system)
        .bind(deployment.status.as_str())
        .bind(deployment.started_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save deployment: {}", e)))?;

        Ok(())
    }

    async fn find_by_vendor_id(&self, vendor_id: &str) -> Result<Vec<Deployment>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, vendor_id, health_system, status, started_at
            FROM vendor_deployments
            WHERE vendor_id = $1
            ORDER BY started_at ASC
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(parse_deployment_row).collect()
    }

    async fn count_active_by_vendor_id(&self, vendor_id: &str) -> Result<u32, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM vendor_deployments WHERE vendor_id = $1 AND status = 'active'",
        )
        .bind(vendor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.clamp(0, u32::MAX as i64) as u32)
    }
}

fn parse_deployment_row(row: sqlx::postgres::PgRow) -> Result<Deployment, RepositoryError> {
    let id: uuid::Uuid = row.try_get("id")?;
    let status_raw: String = row.try_get("status")?;
    let started_at: DateTime<Utc> = row.try_get("started_at")?;

    let status: DeploymentStatus = status_raw
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize status: {}", e)))?;

    Ok(Deployment {
        id: DeploymentId(id),
        vendor_id: row.try_get("vendor_id")?,
        health_system: row.try_get("health_system")?,
        status,
        started_at,
    })
}
