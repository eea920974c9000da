// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Certification Tiers
//!
//! Vendors request one of three ordered tiers. Each tier carries its own
//! requirement table; every table is an exhaustive `match` so that adding a
//! tier is a compile-time checked change.
//!
//! | Tier | Documentation | Compliance | Active deployments |
//! |------|---------------|------------|--------------------|
//! | `Basic` | 1 | HIPAA | 0 |
//! | `Standard` | 2 | HIPAA + NIST | 1 |
//! | `Premium` | 3 | HIPAA + NIST + (FDA or ISO) | 3 |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::compliance::ComplianceStatements;

/// Ordinal certification tier (`Basic < Standard < Premium`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationTier {
    Basic,
    Standard,
    Premium,
}

impl CertificationTier {
    pub const ALL: [CertificationTier; 3] = [
        CertificationTier::Basic,
        CertificationTier::Standard,
        CertificationTier::Premium,
    ];

    /// Minimum number of documentation URLs required for this tier
    pub const fn required_documentation(self) -> usize {
        match self {
            CertificationTier::Basic => 1,
            CertificationTier::Standard => 2,
            CertificationTier::Premium => 3,
        }
    }

    /// Minimum number of active deployments required for this tier
    pub const fn required_active_deployments(self) -> u32 {
        match self {
            CertificationTier::Basic => 0,
            CertificationTier::Standard => 1,
            CertificationTier::Premium => 3,
        }
    }

    /// Evaluate the tier's compliance formula against the vendor's attestations
    pub fn compliance_satisfied(self, statements: &ComplianceStatements) -> bool {
        match self {
            CertificationTier::Basic => statements.hipaa(),
            CertificationTier::Standard => statements.hipaa() && statements.nist(),
            CertificationTier::Premium => {
                statements.hipaa() && statements.nist() && (statements.fda() || statements.iso())
            }
        }
    }

    /// Human-readable list of the attestations this tier expects
    pub const fn compliance_requirement(self) -> &'static str {
        match self {
            CertificationTier::Basic => "HIPAA",
            CertificationTier::Standard => "HIPAA and NIST",
            CertificationTier::Premium => "HIPAA, NIST, and FDA or ISO",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CertificationTier::Basic => "basic",
            CertificationTier::Standard => "standard",
            CertificationTier::Premium => "premium",
        }
    }

    /// Capitalised label used in vendor-facing messages
    pub const fn label(self) -> &'static str {
        match self {
            CertificationTier::Basic => "Basic",
            CertificationTier::Standard => "Standard",
            CertificationTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for CertificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown certification tier: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for CertificationTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(CertificationTier::Basic),
            "standard" => Ok(CertificationTier::Standard),
            "premium" => Ok(CertificationTier::Premium),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}
