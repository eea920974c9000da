// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Automated check snapshot and the fixed scoring weights.

use serde::{Deserialize, Serialize};

pub const DOCUMENTATION_WEIGHT: u8 = 20;
pub const COMPLIANCE_WEIGHT: u8 = 20;
pub const DEPLOYMENT_WEIGHT: u8 = 10;
pub const PHI_EXPOSURE_WEIGHT: u8 = 15;
pub const CLINICAL_ACCURACY_WEIGHT: u8 = 15;
pub const BIAS_DETECTION_WEIGHT: u8 = 10;
pub const SECURITY_SCAN_WEIGHT: u8 = 10;

pub const MAX_SCORE: u8 = 100;

/// The seven boolean signals feeding the score and verdict.
///
/// Three are computed locally from the application; four come from the
/// vendor testing suite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationChecks {
    pub documentation_complete: bool,
    pub compliance_statements_valid: bool,
    pub deployment_history_valid: bool,
    pub phi_exposure_test: bool,
    pub clinical_accuracy_test: bool,
    pub bias_detection_test: bool,
    pub security_scan_test: bool,
}

impl CertificationChecks {
    /// Every check set to `true`
    pub fn all_passing() -> Self {
        Self {
            documentation_complete: true,
            compliance_statements_valid: true,
            deployment_history_valid: true,
            phi_exposure_test: true,
            clinical_accuracy_test: true,
            bias_detection_test: true,
            security_scan_test: true,
        }
    }

    /// Each check paired with its weight, in scoring order
    pub fn weighted(&self) -> [(bool, u8); 7] {
        [
            (self.documentation_complete, DOCUMENTATION_WEIGHT),
            (self.compliance_statements_valid, COMPLIANCE_WEIGHT),
            (self.deployment_history_valid, DEPLOYMENT_WEIGHT),
            (self.phi_exposure_test, PHI_EXPOSURE_WEIGHT),
            (self.clinical_accuracy_test, CLINICAL_ACCURACY_WEIGHT),
            (self.bias_detection_test, BIAS_DETECTION_WEIGHT),
            (self.security_scan_test, SECURITY_SCAN_WEIGHT),
        ]
    }

    /// Weighted sum of passing checks; no partial credit
    pub fn score(&self) -> u8 {
        self.weighted()
            .iter()
            .filter(|(passed, _)| *passed)
            .map(|(_, weight)| *weight)
            .sum()
    }

    pub fn all_passed(&self) -> bool {
        self.weighted().iter().all(|(passed, _)| *passed)
    }

    /// Number of checks currently passing
    pub fn passed_count(&self) -> usize {
        self.weighted().iter().filter(|(passed, _)| *passed).count()
    }
}
