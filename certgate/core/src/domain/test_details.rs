// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Typed views over the free-form `details` payload of a `TestResult`.
//!
//! Every view parses leniently: a missing or malformed payload yields the
//! default view, and recommendation text falls back to generic wording.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Clinical accuracy threshold applied when the suite does not report one
pub const DEFAULT_CLINICAL_ACCURACY_THRESHOLD: f64 = 90.0;

/// Demographic parity / equalized odds differences above this are biased
pub const PARITY_DIFFERENCE_LIMIT: f64 = 0.1;

/// Acceptable disparate impact band (the 80% rule)
pub const DISPARATE_IMPACT_MIN: f64 = 0.8;
pub const DISPARATE_IMPACT_MAX: f64 = 1.25;

fn parse_view<T>(details: Option<&Value>) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    details
        .and_then(|value| serde_json::from_value(value.clone()).ok())
        .unwrap_or_default()
}

// ============================================================================
// PHI exposure
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhiExposureDetails {
    #[serde(alias = "phiCount")]
    pub phi_count: Option<u32>,
    pub violations: Vec<Value>,
    pub entities: Vec<Value>,
    #[serde(alias = "riskScore")]
    pub risk_score: Option<f64>,
}

impl PhiExposureDetails {
    pub fn from_details(details: Option<&Value>) -> Self {
        parse_view(details)
    }

    /// Number of PHI violations, if the suite reported any evidence
    pub fn violation_count(&self) -> Option<u32> {
        if let Some(count) = self.phi_count {
            return Some(count);
        }
        if !self.violations.is_empty() {
            return Some(self.violations.len() as u32);
        }
        if !self.entities.is_empty() {
            return Some(self.entities.len() as u32);
        }
        None
    }
}

// ============================================================================
// Clinical accuracy
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalAccuracyDetails {
    pub threshold: Option<f64>,
}

impl ClinicalAccuracyDetails {
    pub fn from_details(details: Option<&Value>) -> Self {
        parse_view(details)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_CLINICAL_ACCURACY_THRESHOLD)
    }
}

// ============================================================================
// Bias detection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasSeverity {
    None,
    Low,
    Medium,
    High,
}

impl BiasSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Fairness metrics reported by the bias battery
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairnessMetrics {
    pub demographic_parity_difference: f64,
    pub equalized_odds_difference: f64,
    pub disparate_impact_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessAssessment {
    pub bias_detected: bool,
    pub severity: BiasSeverity,
}

impl FairnessMetrics {
    /// Classify the metrics against the parity and 80%-rule thresholds
    pub fn assess(&self) -> FairnessAssessment {
        let dp = sanitize(self.demographic_parity_difference, 0.0).abs();
        let eo = sanitize(self.equalized_odds_difference, 0.0).abs();
        let di = sanitize(self.disparate_impact_ratio, 1.0);

        let bias_detected = dp > PARITY_DIFFERENCE_LIMIT
            || eo > PARITY_DIFFERENCE_LIMIT
            || di < DISPARATE_IMPACT_MIN
            || di > DISPARATE_IMPACT_MAX;

        let severity = if !bias_detected {
            BiasSeverity::None
        } else if dp > 0.2 || eo > 0.2 || di < 0.6 {
            BiasSeverity::High
        } else if dp > 0.15 || eo > 0.15 || di < 0.7 {
            BiasSeverity::Medium
        } else {
            BiasSeverity::Low
        };

        FairnessAssessment { bias_detected, severity }
    }
}

// NaN shows up when every prediction lands in one class
fn sanitize(value: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasDetectionDetails {
    #[serde(alias = "affectedGroups")]
    pub affected_groups: Vec<String>,
    pub metrics: Option<FairnessMetrics>,
    #[serde(alias = "positiveRates")]
    pub positive_rates: BTreeMap<String, f64>,
    pub severity: Option<BiasSeverity>,
}

impl BiasDetectionDetails {
    pub fn from_details(details: Option<&Value>) -> Self {
        parse_view(details)
    }

    /// Demographic groups the disparity affects.
    ///
    /// Explicitly reported groups win; otherwise groups whose positive rate is
    /// below 80% of the best-served group are reported.
    pub fn affected_groups(&self) -> Vec<String> {
        if !self.affected_groups.is_empty() {
            return self.affected_groups.clone();
        }

        let best = self
            .positive_rates
            .values()
            .copied()
            .filter(|rate| !rate.is_nan())
            .fold(0.0_f64, f64::max);
        if best <= 0.0 {
            return Vec::new();
        }

        self.positive_rates
            .iter()
            .filter(|(_, rate)| !rate.is_nan() && **rate / best < DISPARATE_IMPACT_MIN)
            .map(|(group, _)| group.clone())
            .collect()
    }

    pub fn assessment(&self) -> Option<FairnessAssessment> {
        self.metrics.map(|metrics| metrics.assess())
    }
}

// ============================================================================
// Security scan
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityScanDetails {
    #[serde(alias = "vulnerabilityCount")]
    pub vulnerability_count: Option<u32>,
    pub vulnerabilities: Vec<Value>,
}

impl SecurityScanDetails {
    pub fn from_details(details: Option<&Value>) -> Self {
        parse_view(details)
    }

    pub fn vulnerability_count(&self) -> Option<u32> {
        self.vulnerability_count.or_else(|| {
            if self.vulnerabilities.is_empty() {
                None
            } else {
                Some(self.vulnerabilities.len() as u32)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phi_violation_count_sources() {
        let explicit = json!({"phi_count": 4, "entities": [{}]});
        assert_eq!(PhiExposureDetails::from_details(Some(&explicit)).violation_count(), Some(4));

        let listed = json!({"violations": [{"type": "US_SSN"}, {"type": "PERSON"}]});
        assert_eq!(PhiExposureDetails::from_details(Some(&listed)).violation_count(), Some(2));

        assert_eq!(PhiExposureDetails::from_details(None).violation_count(), None);
    }

    #[test]
    fn test_malformed_details_fall_back_to_default() {
        let malformed = json!({"phi_count": "many"});
        assert_eq!(PhiExposureDetails::from_details(Some(&malformed)), PhiExposureDetails::default());

        let not_object = json!("oops");
        assert_eq!(ClinicalAccuracyDetails::from_details(Some(&not_object)).threshold(), DEFAULT_CLINICAL_ACCURACY_THRESHOLD);
    }

    #[test]
    fn test_clinical_threshold_override() {
        let details = json!({"threshold": 85.0});
        assert_eq!(ClinicalAccuracyDetails::from_details(Some(&details)).threshold(), 85.0);
    }

    #[test]
    fn test_fairness_assessment_fair() {
        let metrics = FairnessMetrics {
            demographic_parity_difference: 0.05,
            equalized_odds_difference: -0.08,
            disparate_impact_ratio: 0.95,
        };
        let assessment = metrics.assess();
        assert!(!assessment.bias_detected);
        assert_eq!(assessment.severity, BiasSeverity::None);
    }

    #[test]
    fn test_fairness_assessment_severity_bands() {
        let low = FairnessMetrics {
            demographic_parity_difference: 0.12,
            equalized_odds_difference: 0.0,
            disparate_impact_ratio: 0.9,
        };
        assert_eq!(low.assess().severity, BiasSeverity::Low);

        let medium = FairnessMetrics {
            demographic_parity_difference: 0.0,
            equalized_odds_difference: 0.0,
            disparate_impact_ratio: 0.65,
        };
        assert_eq!(medium.assess().severity, BiasSeverity::Medium);

        let high = FairnessMetrics {
            demographic_parity_difference: -0.25,
            equalized_odds_difference: 0.0,
            disparate_impact_ratio: 1.0,
        };
        assert_eq!(high.assess().severity, BiasSeverity::High);

        let favoring = FairnessMetrics {
            demographic_parity_difference: 0.0,
            equalized_odds_difference: 0.0,
            disparate_impact_ratio: 1.4,
        };
        assert!(favoring.assess().bias_detected);
    }

    #[test]
    fn test_nan_metrics_are_treated_as_fair() {
        let metrics = FairnessMetrics {
            demographic_parity_difference: f64::NAN,
            equalized_odds_difference: f64::NAN,
            disparate_impact_ratio: f64::NAN,
        };
        assert!(!metrics.assess().bias_detected);
    }

    #[test]
    fn test_affected_groups_explicit_and_derived() {
        let explicit = json!({"affected_groups": ["age_65_plus"]});
        assert_eq!(
            BiasDetectionDetails::from_details(Some(&explicit)).affected_groups(),
            vec!["age_65_plus".to_string()]
        );

        let derived = json!({"positive_rates": {"female": 0.40, "male": 0.60, "nonbinary": 0.55}});
        assert_eq!(
            BiasDetectionDetails::from_details(Some(&derived)).affected_groups(),
            vec!["female".to_string()]
        );
    }

    #[test]
    fn test_security_vulnerability_count() {
        let listed = json!({"vulnerabilities": [{"id": "CVE-1"}, {"id": "CVE-2"}, {"id": "CVE-3"}]});
        assert_eq!(SecurityScanDetails::from_details(Some(&listed)).vulnerability_count(), Some(3));

        let counted = json!({"vulnerabilityCount": 7});
        assert_eq!(SecurityScanDetails::from_details(Some(&counted)).vulnerability_count(), Some(7));
    }
}
