// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::certification::CertificationApplicationId;
use crate::domain::tier::CertificationTier;

/// Events raised by `CertificationApplication` commands.
///
/// Commands return the event they raised; callers publish it only after the
/// aggregate has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CertificationEvent {
    ApplicationCreated {
        application_id: CertificationApplicationId,
        vendor_id: String,
        tier_requested: CertificationTier,
        created_at: DateTime<Utc>,
    },
    AutomatedChecksCompleted {
        application_id: CertificationApplicationId,
        passed: bool,
        score: u8,
        completed_at: DateTime<Utc>,
    },
    ApplicationApproved {
        application_id: CertificationApplicationId,
        tier_awarded: CertificationTier,
        approved_at: DateTime<Utc>,
    },
    ApplicationRejected {
        application_id: CertificationApplicationId,
        reason: String,
        rejected_at: DateTime<Utc>,
    },
}

impl CertificationEvent {
    pub fn application_id(&self) -> CertificationApplicationId {
        match self {
            Self::ApplicationCreated { application_id, .. }
            | Self::AutomatedChecksCompleted { application_id, .. }
            | Self::ApplicationApproved { application_id, .. }
            | Self::ApplicationRejected { application_id, .. } => *application_id,
        }
    }

    /// Stable name used in logs and metrics labels
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ApplicationCreated { .. } => "application_created",
            Self::AutomatedChecksCompleted { .. } => "automated_checks_completed",
            Self::ApplicationApproved { .. } => "application_approved",
            Self::ApplicationRejected { .. } => "application_rejected",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::ApplicationCreated { created_at, .. } => *created_at,
            Self::AutomatedChecksCompleted { completed_at, .. } => *completed_at,
            Self::ApplicationApproved { approved_at, .. } => *approved_at,
            Self::ApplicationRejected { rejected_at, .. } => *rejected_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_tag() {
        let id = CertificationApplicationId::new();
        let event = CertificationEvent::ApplicationRejected {
            application_id: id,
            reason: "incomplete".to_string(),
            rejected_at: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "application_rejected");
        assert_eq!(json["reason"], "incomplete");
        assert_eq!(event.application_id(), id);
        assert_eq!(event.event_type(), "application_rejected");
    }
}
