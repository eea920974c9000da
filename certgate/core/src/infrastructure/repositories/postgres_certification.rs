// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Certification Application
//!
//! PostgreSQL adapter for `CertificationApplicationRepository`. Structured
//! fields (documentation URLs, compliance statements, checks, test results,
//! recommendations) are stored as JSONB; `version` backs the optimistic
//! compare-and-swap in `save`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Persist certification applications (`certification_applications` table)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::Row;

use crate::domain::certification::{
    ApplicationStatus, CertificationApplication, CertificationApplicationId, CertificationApplicationSnapshot,
};
use crate::domain::checks::CertificationChecks;
use crate::domain::compliance::ComplianceStatements;
use crate::domain::repository::{CertificationApplicationRepository, RepositoryError};
use crate::domain::testing_suite::TestResult;
use crate::domain::tier::CertificationTier;

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, vendor_id, tier_requested, documentation_urls, compliance_statements,
        api_endpoint, status, automated_checks_passed, score, checks, test_results,
        recommendations, rejection_reason, reviewed_at, version, created_at, updated_at
    FROM certification_applications
"#;

pub struct PostgresCertificationApplicationRepository {
    pool: PgPool,
}

impl PostgresCertificationApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn current_version(&self, id: CertificationApplicationId) -> Result<u64, RepositoryError> {
        let version: Option<i64> = sqlx::query_scalar("SELECT version FROM certification_applications WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;
        Ok(version.unwrap_or(0) as u64)
    }

    async fn fetch_many(&self, clause: &str, bind: &str) -> Result<Vec<CertificationApplication>, RepositoryError> {
        let sql = format!("{} {} ORDER BY created_at ASC", SELECT_COLUMNS, clause);
        let rows = sqlx::query(&sql)
            .bind(bind)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(parse_application_row).collect()
    }
}

#[async_trait]
impl CertificationApplicationRepository for PostgresCertificationApplicationRepository {
    async fn save(&self, application: &CertificationApplication) -> Result<CertificationApplication, RepositoryError> {
        let mut snapshot = application.snapshot();
        let expected = snapshot.version;
        let next = expected + 1;

        let documentation_json = serde_json::to_value(&snapshot.documentation_urls)?;
        let compliance_json = serde_json::to_value(&snapshot.compliance_statements)?;
        let checks_json = snapshot.checks.as_ref().map(serde_json::to_value).transpose()?;
        let test_results_json = serde_json::to_value(&snapshot.test_results)?;
        let recommendations_json = serde_json::to_value(&snapshot.recommendations)?;

        // First save inserts at version 1; later saves update only the expected version
        let sql = if expected == 0 {
            r#"
            INSERT INTO certification_applications (
                id, vendor_id, tier_requested, documentation_urls, compliance_statements,
                api_endpoint, status, automated_checks_passed, score, checks, test_results,
                recommendations, rejection_reason, reviewed_at, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (id) DO NOTHING
            "#
        } else {
            r#"
            UPDATE certification_applications SET
                vendor_id = $2,
                tier_requested = $3,
                documentation_urls = $4,
                compliance_statements = $5,
                api_endpoint = $6,
                status = $7,
                automated_checks_passed = $8,
                score = $9,
                checks = $10,
                test_results = $11,
                recommendations = $12,
                rejection_reason = $13,
                reviewed_at = $14,
                version = $15,
                created_at = $16,
                updated_at = $17
            WHERE id = $1 AND version = $18
            "#
        };

        let mut query = sqlx::query(sql)
            .bind(snapshot.id.0)
            .bind(&snapshot.vendor_id)
            .bind(snapshot.tier_requested.as_str())
            .bind(documentation_json)
            .bind(compliance_json)
            .bind(snapshot.api_endpoint.as_deref())
            .bind(snapshot.status.as_str())
            .bind(snapshot.automated_checks_passed)
            .bind(snapshot.score as i16)
            .bind(checks_json)
            .bind(test_results_json)
            .bind(recommendations_json)
            .bind(snapshot.rejection_reason.as_deref())
            .bind(snapshot.reviewed_at)
            .bind(next as i64)
            .bind(snapshot.created_at)
            .bind(snapshot.updated_at);
        if expected > 0 {
            query = query.bind(expected as i64);
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to save certification application: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::VersionConflict {
                id: snapshot.id.to_string(),
                expected,
                actual: self.current_version(snapshot.id).await?,
            });
        }

        snapshot.version = next;
        Ok(CertificationApplication::reconstitute(snapshot))
    }

    async fn find_by_id(&self, id: CertificationApplicationId) -> Result<Option<CertificationApplication>, RepositoryError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(parse_application_row).transpose()
    }

    async fn find_by_vendor_id(&self, vendor_id: &str) -> Result<Vec<CertificationApplication>, RepositoryError> {
        self.fetch_many("WHERE vendor_id = $1", vendor_id).await
    }

    async fn find_by_status(&self, status: ApplicationStatus) -> Result<Vec<CertificationApplication>, RepositoryError> {
        self.fetch_many("WHERE status = $1", status.as_str()).await
    }

    async fn exists(&self, id: CertificationApplicationId) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM certification_applications WHERE id = $1)")
            .bind(id.0)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_all(&self) -> Result<Vec<CertificationApplication>, RepositoryError> {
        let sql = format!("{} ORDER BY created_at ASC", SELECT_COLUMNS);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(parse_application_row).collect()
    }
}

/// Parse an application from a database row
fn parse_application_row(row: sqlx::postgres::PgRow) -> Result<CertificationApplication, RepositoryError> {
    let id: uuid::Uuid = row.try_get("id")?;
    let tier_raw: String = row.try_get("tier_requested")?;
    let status_raw: String = row.try_get("status")?;
    let documentation_val: serde_json::Value = row.try_get("documentation_urls")?;
    let compliance_val: serde_json::Value = row.try_get("compliance_statements")?;
    let checks_val: Option<serde_json::Value> = row.try_get("checks")?;
    let test_results_val: serde_json::Value = row.try_get("test_results")?;
    let recommendations_val: serde_json::Value = row.try_get("recommendations")?;
    let score: i16 = row.try_get("score")?;
    let version: i64 = row.try_get("version")?;
    let reviewed_at: Option<DateTime<Utc>> = row.try_get("reviewed_at")?;

    let tier_requested: CertificationTier = tier_raw
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize tier_requested: {}", e)))?;

    let status: ApplicationStatus = status_raw
        .parse()
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize status: {}", e)))?;

    let documentation_urls: Vec<String> = serde_json::from_value(documentation_val)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize documentation_urls: {}", e)))?;

    let checks: Option<CertificationChecks> = checks_val
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize checks: {}", e)))?;

    let test_results: Vec<TestResult> = serde_json::from_value(test_results_val)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize test_results: {}", e)))?;

    let recommendations: Vec<String> = serde_json::from_value(recommendations_val)
        .map_err(|e| RepositoryError::Serialization(format!("Failed to deserialize recommendations: {}", e)))?;

    Ok(CertificationApplication::reconstitute(CertificationApplicationSnapshot {
        id: CertificationApplicationId(id),
        vendor_id: row.try_get("vendor_id")?,
        tier_requested,
        documentation_urls,
        compliance_statements: ComplianceStatements::from_json(&compliance_val),
        api_endpoint: row.try_get("api_endpoint")?,
        status,
        automated_checks_passed: row.try_get("automated_checks_passed")?,
        score: score.clamp(0, 100) as u8,
        checks,
        test_results,
        recommendations,
        rejection_reason: row.try_get("rejection_reason")?,
        reviewed_at,
        version: version.max(0) as u64,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    }))
}
