// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Vendor deployments at health systems. Only `Active` deployments count
//! toward a tier's deployment-history threshold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeploymentId(pub Uuid);

impl DeploymentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeploymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    Active,
    #[default]
    Pending,
    Inactive,
    Terminated,
}

impl DeploymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown deployment status: {0}")]
pub struct UnknownDeploymentStatus(pub String);

impl FromStr for DeploymentStatus {
    type Err = UnknownDeploymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "inactive" => Ok(Self::Inactive),
            "terminated" => Ok(Self::Terminated),
            other => Err(UnknownDeploymentStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: DeploymentId,
    pub vendor_id: String,
    pub health_system: String,
    pub status: DeploymentStatus,
    pub started_at: DateTime<Utc>,
}

impl Deployment {
    pub fn new(vendor_id: impl Into<String>, health_system: impl Into<String>, status: DeploymentStatus) -> Self {
        Self {
            id: DeploymentId::new(),
            vendor_id: vendor_id.into(),
            health_system: health_system.into(),
            status,
            started_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == DeploymentStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_counts() {
        let statuses = [
            DeploymentStatus::Active,
            DeploymentStatus::Pending,
            DeploymentStatus::Inactive,
            DeploymentStatus::Terminated,
        ];
        let active: Vec<bool> = statuses
            .iter()
            .map(|s| Deployment::new("vendor-1", "General Hospital", *s).is_active())
            .collect();
        assert_eq!(active, vec![true, false, false, false]);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("ACTIVE".parse::<DeploymentStatus>().unwrap(), DeploymentStatus::Active);
        assert!("paused".parse::<DeploymentStatus>().is_err());
    }
}
