// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::certification::CertificationError;
use crate::domain::repository::RepositoryError;

/// Failures surfaced by the submit and review use cases
#[derive(Debug, thiserror::Error)]
pub enum CertificationUseCaseError {
    #[error(transparent)]
    Domain(#[from] CertificationError),

    #[error("Application not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Invalid request: {0}")]
    Validation(String),
}
