// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Certification Application Aggregate
//!
//! Owns every tier-specific business rule, the scoring formula, and the
//! review state machine:
//!
//! ```text
//! PENDING --(checks pass)--> IN_REVIEW --(approve)--> APPROVED
//! PENDING --(checks fail)--> PENDING
//! IN_REVIEW --(checks fail)--> PENDING
//! {PENDING, IN_REVIEW, REJECTED} --(reject)--> REJECTED
//! ```
//!
//! Commands are guarded transitions. Each one either fails without touching
//! state or applies the transition and returns the `CertificationEvent` it
//! raised; nothing is buffered inside the aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::checks::CertificationChecks;
use crate::domain::compliance::ComplianceStatements;
use crate::domain::events::CertificationEvent;
use crate::domain::testing_suite::TestResult;
use crate::domain::tier::CertificationTier;

// ============================================================================
// Value Objects
// ============================================================================

/// Unique identifier for a certification application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CertificationApplicationId(pub Uuid);

impl CertificationApplicationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl Default for CertificationApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CertificationApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting (or failed) automated checks
    Pending,
    /// Automated checks passed; waiting on a human reviewer
    InReview,
    /// Certified at the requested tier
    Approved,
    /// Turned down by a reviewer
    Rejected,
}

impl ApplicationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InReview => "in_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Automated checks may run (or re-run) from this status
    pub fn can_process(self) -> bool {
        matches!(self, Self::Pending | Self::InReview)
    }

    pub fn can_reject(self) -> bool {
        !matches!(self, Self::Approved)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = CertificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_review" => Ok(Self::InReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(CertificationError::UnknownStatus(other.to_string())),
        }
    }
}

// ============================================================================
// Persistence Snapshot
// ============================================================================

/// Every persisted field of the aggregate.
///
/// Repository adapters read a snapshot out of the aggregate to store it and
/// hand one back to `CertificationApplication::reconstitute` to rebuild it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationApplicationSnapshot {
    pub id: CertificationApplicationId,
    pub vendor_id: String,
    pub tier_requested: CertificationTier,
    pub documentation_urls: Vec<String>,
    pub compliance_statements: ComplianceStatements,
    pub api_endpoint: Option<String>,
    pub status: ApplicationStatus,
    pub automated_checks_passed: bool,
    pub score: u8,
    pub checks: Option<CertificationChecks>,
    pub test_results: Vec<TestResult>,
    pub recommendations: Vec<String>,
    pub rejection_reason: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Aggregate Root: CertificationApplication
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CertificationApplication {
    id: CertificationApplicationId,
    vendor_id: String,
    tier_requested: CertificationTier,
    documentation_urls: Vec<String>,
    compliance_statements: ComplianceStatements,
    api_endpoint: Option<String>,
    status: ApplicationStatus,
    automated_checks_passed: bool,
    score: u8,
    checks: Option<CertificationChecks>,
    test_results: Vec<TestResult>,
    recommendations: Vec<String>,
    rejection_reason: Option<String>,
    reviewed_at: Option<DateTime<Utc>>,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CertificationApplication {
    /// Create a new application (aggregate factory method)
    pub fn create(
        vendor_id: impl Into<String>,
        tier_requested: CertificationTier,
        documentation_urls: Vec<String>,
        compliance_statements: ComplianceStatements,
        api_endpoint: Option<String>,
    ) -> Result<(Self, CertificationEvent), CertificationError> {
        let vendor_id = vendor_id.into();

        // Invariant: vendor id must not be empty
        if vendor_id.trim().is_empty() {
            return Err(CertificationError::MissingVendorId);
        }

        let api_endpoint = api_endpoint
            .map(|endpoint| endpoint.trim().to_string())
            .filter(|endpoint| !endpoint.is_empty());

        let id = CertificationApplicationId::new();
        let now = Utc::now();

        let application = Self {
            id,
            vendor_id: vendor_id.clone(),
            tier_requested,
            documentation_urls,
            compliance_statements,
            api_endpoint,
            status: ApplicationStatus::Pending,
            automated_checks_passed: false,
            score: 0,
            checks: None,
            test_results: Vec::new(),
            recommendations: Vec::new(),
            rejection_reason: None,
            reviewed_at: None,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let event = CertificationEvent::ApplicationCreated {
            application_id: id,
            vendor_id,
            tier_requested,
            created_at: now,
        };

        Ok((application, event))
    }

    /// Rebuild an aggregate from persisted state. Raises no events.
    pub fn reconstitute(snapshot: CertificationApplicationSnapshot) -> Self {
        Self {
            id: snapshot.id,
            vendor_id: snapshot.vendor_id,
            tier_requested: snapshot.tier_requested,
            documentation_urls: snapshot.documentation_urls,
            compliance_statements: snapshot.compliance_statements,
            api_endpoint: snapshot.api_endpoint,
            status: snapshot.status,
            automated_checks_passed: snapshot.automated_checks_passed,
            score: snapshot.score.min(crate::domain::checks::MAX_SCORE),
            checks: snapshot.checks,
            test_results: snapshot.test_results,
            recommendations: snapshot.recommendations,
            rejection_reason: snapshot.rejection_reason,
            reviewed_at: snapshot.reviewed_at,
            version: snapshot.version,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }

    pub fn snapshot(&self) -> CertificationApplicationSnapshot {
        CertificationApplicationSnapshot {
            id: self.id,
            vendor_id: self.vendor_id.clone(),
            tier_requested: self.tier_requested,
            documentation_urls: self.documentation_urls.clone(),
            compliance_statements: self.compliance_statements.clone(),
            api_endpoint: self.api_endpoint.clone(),
            status: self.status,
            automated_checks_passed: self.automated_checks_passed,
            score: self.score,
            checks: self.checks,
            test_results: self.test_results.clone(),
            recommendations: self.recommendations.clone(),
            rejection_reason: self.rejection_reason.clone(),
            reviewed_at: self.reviewed_at,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    // ========================================================================
    // Tier Rules (pure)
    // ========================================================================

    pub fn is_documentation_complete(&self) -> bool {
        self.documentation_urls.len() >= self.tier_requested.required_documentation()
    }

    pub fn are_compliance_statements_valid(&self) -> bool {
        self.tier_requested.compliance_satisfied(&self.compliance_statements)
    }

    /// `active_deployment_count` must already exclude non-active deployments
    pub fn is_deployment_history_valid(&self, active_deployment_count: u32) -> bool {
        active_deployment_count >= self.get_deployment_requirement()
    }

    pub fn get_deployment_requirement(&self) -> u32 {
        self.tier_requested.required_active_deployments()
    }

    pub fn get_documentation_requirement(&self) -> usize {
        self.tier_requested.required_documentation()
    }

    /// Weighted sum of passing checks. Independent of tier.
    pub fn calculate_score(checks: &CertificationChecks) -> u8 {
        checks.score()
    }

    pub fn determine_overall_pass(checks: &CertificationChecks) -> bool {
        checks.all_passed()
    }

    // ========================================================================
    // Aggregate Commands (State Mutations)
    // ========================================================================

    /// Fold a full check snapshot into the aggregate
    pub fn process_automated_checks(
        &mut self,
        checks: CertificationChecks,
        test_results: Vec<TestResult>,
        recommendations: Vec<String>,
    ) -> Result<CertificationEvent, CertificationError> {
        if !self.status.can_process() {
            return Err(CertificationError::CannotProcess { status: self.status });
        }

        let passed = Self::determine_overall_pass(&checks);
        let score = Self::calculate_score(&checks);
        let now = Utc::now();

        self.automated_checks_passed = passed;
        self.score = score;
        self.checks = Some(checks);
        self.test_results = test_results;
        self.recommendations = recommendations;
        self.status = if passed {
            ApplicationStatus::InReview
        } else {
            ApplicationStatus::Pending
        };
        self.updated_at = now;

        Ok(CertificationEvent::AutomatedChecksCompleted {
            application_id: self.id,
            passed,
            score,
            completed_at: now,
        })
    }

    /// Certify the vendor at the requested tier
    pub fn approve(&mut self) -> Result<CertificationEvent, CertificationError> {
        if self.status != ApplicationStatus::InReview {
            return Err(CertificationError::NotInReview);
        }
        if !self.automated_checks_passed {
            return Err(CertificationError::FailedAutomatedChecks);
        }

        let now = Utc::now();
        self.status = ApplicationStatus::Approved;
        self.reviewed_at = Some(now);
        self.updated_at = now;

        Ok(CertificationEvent::ApplicationApproved {
            application_id: self.id,
            tier_awarded: self.tier_requested,
            approved_at: now,
        })
    }

    /// Turn the application down, recording the reviewer's reason verbatim
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<CertificationEvent, CertificationError> {
        if !self.status.can_reject() {
            return Err(CertificationError::AlreadyApproved);
        }

        let reason = reason.into();
        let now = Utc::now();
        self.status = ApplicationStatus::Rejected;
        self.rejection_reason = Some(reason.clone());
        self.reviewed_at = Some(now);
        self.updated_at = now;

        Ok(CertificationEvent::ApplicationRejected {
            application_id: self.id,
            reason,
            rejected_at: now,
        })
    }

    // ========================================================================
    // Aggregate Queries (State Inspection)
    // ========================================================================

    pub fn can_be_approved(&self) -> bool {
        self.status == ApplicationStatus::InReview && self.automated_checks_passed
    }

    pub fn can_be_rejected(&self) -> bool {
        self.status.can_reject()
    }

    pub fn can_be_processed(&self) -> bool {
        self.status.can_process()
    }

    pub fn id(&self) -> CertificationApplicationId {
        self.id
    }

    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    pub fn tier_requested(&self) -> CertificationTier {
        self.tier_requested
    }

    pub fn documentation_urls(&self) -> &[String] {
        &self.documentation_urls
    }

    pub fn compliance_statements(&self) -> &ComplianceStatements {
        &self.compliance_statements
    }

    pub fn api_endpoint(&self) -> Option<&str> {
        self.api_endpoint.as_deref()
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn automated_checks_passed(&self) -> bool {
        self.automated_checks_passed
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    /// Check snapshot from the last `process_automated_checks` call
    pub fn checks(&self) -> Option<&CertificationChecks> {
        self.checks.as_ref()
    }

    pub fn test_results(&self) -> &[TestResult] {
        &self.test_results
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    pub fn reviewed_at(&self) -> Option<DateTime<Utc>> {
        self.reviewed_at
    }

    /// Optimistic concurrency counter; 0 until first persisted
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// ============================================================================
// Domain Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificationError {
    #[error("Vendor ID is required")]
    MissingVendorId,

    #[error("Can only approve applications in review")]
    NotInReview,

    #[error("Cannot approve application that failed automated checks")]
    FailedAutomatedChecks,

    #[error("Cannot reject approved application")]
    AlreadyApproved,

    #[error("Cannot process automated checks for {status} application")]
    CannotProcess { status: ApplicationStatus },

    #[error("Unknown application status: {0}")]
    UnknownStatus(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing_suite::TestType;
    use serde_json::json;

    fn urls(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("https://docs.example.com/u{}", i)).collect()
    }

    fn application(tier: CertificationTier, docs: usize, compliance: serde_json::Value) -> CertificationApplication {
        let (app, _) = CertificationApplication::create(
            "vendor-123",
            tier,
            urls(docs),
            ComplianceStatements::from_json(&compliance),
            None,
        )
        .unwrap();
        app
    }

    fn in_review(tier: CertificationTier) -> CertificationApplication {
        let mut app = application(tier, 3, json!({"hipaa": true, "nist": true, "fda": true}));
        app.process_automated_checks(CertificationChecks::all_passing(), vec![], vec![])
            .unwrap();
        app
    }

    #[test]
    fn test_create_starts_pending_with_event() {
        let (app, event) = CertificationApplication::create(
            "vendor-123",
            CertificationTier::Standard,
            urls(2),
            ComplianceStatements::none().with("hipaa", true),
            Some("  https://api.vendor.test  ".to_string()),
        )
        .unwrap();

        assert_eq!(app.status(), ApplicationStatus::Pending);
        assert_eq!(app.score(), 0);
        assert!(app.checks().is_none());
        assert!(!app.automated_checks_passed());
        assert_eq!(app.version(), 0);
        assert_eq!(app.api_endpoint(), Some("https://api.vendor.test"));

        match event {
            CertificationEvent::ApplicationCreated { application_id, vendor_id, tier_requested, .. } => {
                assert_eq!(application_id, app.id());
                assert_eq!(vendor_id, "vendor-123");
                assert_eq!(tier_requested, CertificationTier::Standard);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_create_rejects_empty_vendor_id() {
        for vendor in ["", "   "] {
            let result = CertificationApplication::create(
                vendor,
                CertificationTier::Basic,
                urls(1),
                ComplianceStatements::none(),
                None,
            );
            assert_eq!(result.unwrap_err(), CertificationError::MissingVendorId);
        }
    }

    #[test]
    fn test_blank_api_endpoint_is_dropped() {
        let (app, _) = CertificationApplication::create(
            "vendor-123",
            CertificationTier::Basic,
            urls(1),
            ComplianceStatements::none(),
            Some("   ".to_string()),
        )
        .unwrap();
        assert!(app.api_endpoint().is_none());
    }

    #[test]
    fn test_documentation_completeness_per_tier() {
        for tier in CertificationTier::ALL {
            for n in 0..=4 {
                let app = application(tier, n, json!({}));
                assert_eq!(
                    app.is_documentation_complete(),
                    n >= tier.required_documentation(),
                    "tier {:?} with {} docs",
                    tier,
                    n
                );
            }
        }
    }

    #[test]
    fn test_compliance_formula_per_tier() {
        let cases = [
            (CertificationTier::Basic, json!({"hipaa": true}), true),
            (CertificationTier::Basic, json!({"nist": true}), false),
            (CertificationTier::Standard, json!({"hipaa": true}), false),
            (CertificationTier::Standard, json!({"hipaa": true, "nist": true}), true),
            (CertificationTier::Premium, json!({"hipaa": true, "nist": true}), false),
            (CertificationTier::Premium, json!({"hipaa": true, "nist": true, "iso": true}), true),
            (CertificationTier::Premium, json!({"hipaa": true, "nist": true, "fda": true}), true),
            (CertificationTier::Premium, json!({"hipaa": false, "nist": true, "fda": true, "iso": true}), false),
        ];

        for (tier, compliance, expected) in cases {
            let app = application(tier, 1, compliance.clone());
            assert_eq!(app.are_compliance_statements_valid(), expected, "{:?} {}", tier, compliance);
        }
    }

    #[test]
    fn test_deployment_history_thresholds_are_monotonic() {
        for tier in CertificationTier::ALL {
            let app = application(tier, 1, json!({}));
            let mut seen_valid = false;
            for count in 0..6 {
                let valid = app.is_deployment_history_valid(count);
                assert_eq!(valid, count >= tier.required_active_deployments());
                assert!(!(seen_valid && !valid), "validity must not regress as count grows");
                seen_valid |= valid;
            }
        }
    }

    #[test]
    fn test_local_checks_basic_scenario() {
        let app = application(CertificationTier::Basic, 1, json!({"hipaa": true}));
        assert!(app.is_documentation_complete());
        assert!(app.are_compliance_statements_valid());
        assert!(app.is_deployment_history_valid(0));
    }

    #[test]
    fn test_process_automated_checks_pass_moves_to_review() {
        let mut app = application(CertificationTier::Basic, 1, json!({"hipaa": true}));
        let results = vec![TestResult::new(TestType::PhiExposure, true, 100.0)];
        let event = app
            .process_automated_checks(CertificationChecks::all_passing(), results.clone(), vec![])
            .unwrap();

        assert_eq!(app.status(), ApplicationStatus::InReview);
        assert_eq!(app.score(), 100);
        assert!(app.automated_checks_passed());
        assert_eq!(app.test_results(), results.as_slice());
        assert_eq!(
            event,
            CertificationEvent::AutomatedChecksCompleted {
                application_id: app.id(),
                passed: true,
                score: 100,
                completed_at: app.updated_at(),
            }
        );
    }

    #[test]
    fn test_process_automated_checks_failure_stays_pending() {
        let mut app = application(CertificationTier::Standard, 2, json!({"hipaa": true, "nist": true}));
        let checks = CertificationChecks {
            documentation_complete: true,
            compliance_statements_valid: true,
            ..CertificationChecks::default()
        };
        let recommendations = vec!["Standard tier requires at least 1 active deployment".to_string()];

        app.process_automated_checks(checks, vec![], recommendations.clone())
            .unwrap();

        assert_eq!(app.status(), ApplicationStatus::Pending);
        assert_eq!(app.score(), 40);
        assert!(!app.automated_checks_passed());
        assert_eq!(app.recommendations(), recommendations.as_slice());
    }

    #[test]
    fn test_failed_rerun_returns_review_to_pending() {
        let mut app = in_review(CertificationTier::Basic);
        let mut checks = CertificationChecks::all_passing();
        checks.security_scan_test = false;

        app.process_automated_checks(checks, vec![], vec![]).unwrap();
        assert_eq!(app.status(), ApplicationStatus::Pending);
        assert_eq!(app.score(), 90);
    }

    #[test]
    fn test_processing_refused_after_decision() {
        let mut approved = in_review(CertificationTier::Basic);
        approved.approve().unwrap();
        let err = approved
            .process_automated_checks(CertificationChecks::all_passing(), vec![], vec![])
            .unwrap_err();
        assert_eq!(err, CertificationError::CannotProcess { status: ApplicationStatus::Approved });
        assert_eq!(approved.status(), ApplicationStatus::Approved);

        let mut rejected = application(CertificationTier::Basic, 1, json!({}));
        rejected.reject("incomplete").unwrap();
        assert!(!rejected.can_be_processed());
        assert!(rejected
            .process_automated_checks(CertificationChecks::all_passing(), vec![], vec![])
            .is_err());
    }

    #[test]
    fn test_approve_pending_fails() {
        let mut app = application(CertificationTier::Basic, 1, json!({"hipaa": true}));
        let err = app.approve().unwrap_err();
        assert_eq!(err.to_string(), "Can only approve applications in review");
        assert_eq!(app.status(), ApplicationStatus::Pending);
        assert!(!app.can_be_approved());
    }

    #[test]
    fn test_approve_in_review_then_again_fails() {
        let mut app = in_review(CertificationTier::Premium);
        assert!(app.can_be_approved());

        let event = app.approve().unwrap();
        assert_eq!(app.status(), ApplicationStatus::Approved);
        assert!(app.reviewed_at().is_some());
        match event {
            CertificationEvent::ApplicationApproved { tier_awarded, .. } => {
                assert_eq!(tier_awarded, CertificationTier::Premium)
            }
            other => panic!("unexpected event: {:?}", other),
        }

        assert_eq!(app.approve().unwrap_err(), CertificationError::NotInReview);
    }

    #[test]
    fn test_approve_with_failed_checks_is_refused() {
        // Only reachable through persisted state that disagrees with the status
        let mut snapshot = in_review(CertificationTier::Basic).snapshot();
        snapshot.automated_checks_passed = false;
        let mut app = CertificationApplication::reconstitute(snapshot);

        let err = app.approve().unwrap_err();
        assert_eq!(err.to_string(), "Cannot approve application that failed automated checks");
        assert!(!app.can_be_approved());
    }

    #[test]
    fn test_reject_stores_literal_reason() {
        let reason = "  Missing SOC 2 report; resubmit after audit.  ";
        for mut app in [
            application(CertificationTier::Basic, 1, json!({})),
            in_review(CertificationTier::Basic),
        ] {
            let event = app.reject(reason).unwrap();
            assert_eq!(app.status(), ApplicationStatus::Rejected);
            assert_eq!(app.rejection_reason(), Some(reason));
            match event {
                CertificationEvent::ApplicationRejected { reason: r, .. } => assert_eq!(r, reason),
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[test]
    fn test_reject_approved_fails() {
        let mut app = in_review(CertificationTier::Basic);
        app.approve().unwrap();
        assert!(!app.can_be_rejected());

        let err = app.reject("too late").unwrap_err();
        assert_eq!(err.to_string(), "Cannot reject approved application");
        assert_eq!(app.status(), ApplicationStatus::Approved);
        assert!(app.rejection_reason().is_none());
    }

    #[test]
    fn test_rejected_application_can_be_rejected_again() {
        let mut app = application(CertificationTier::Basic, 1, json!({}));
        app.reject("first").unwrap();
        app.reject("second").unwrap();
        assert_eq!(app.rejection_reason(), Some("second"));
    }

    #[test]
    fn test_reconstitute_round_trips_snapshot() {
        let mut app = in_review(CertificationTier::Standard);
        app.reject("needs deployments").unwrap();

        let rebuilt = CertificationApplication::reconstitute(app.snapshot());
        assert_eq!(rebuilt, app);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("IN_REVIEW".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::InReview);
        assert_eq!("in-review".parse::<ApplicationStatus>().unwrap(), ApplicationStatus::InReview);
        assert!("archived".parse::<ApplicationStatus>().is_err());
        assert_eq!(ApplicationStatus::InReview.to_string(), "in_review");
    }
}
