//! Dispute case records.
//!
//! A case is opened against a funded order and tied 1:1 to it. Expiry is a
//! wall-clock comparison at read time; nothing schedules it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::order::{Contract, OrderState};

/// The moderator's decision on a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisputeResolution {
    pub resolution: String,
    pub buyer_percentage: f64,
    pub vendor_percentage: f64,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Persisted state of one moderated dispute.
///
/// The buyer and vendor contract snapshots arrive independently after the
/// case is opened and are immutable once stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisputeCaseRecord {
    pub case_id: String,
    pub claim: String,
    pub order_state: OrderState,
    pub buyer_contract: Option<Contract>,
    pub vendor_contract: Option<Contract>,
    pub buyer_payout_address: String,
    pub buyer_outpoints: Vec<String>,
    pub vendor_payout_address: String,
    pub vendor_outpoints: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub resolution: Option<DisputeResolution>,
}

impl DisputeCaseRecord {
    pub fn new(
        case_id: String,
        claim: String,
        order_state: OrderState,
        opened_at: DateTime<Utc>,
        window: Duration,
    ) -> Self {
        Self {
            case_id,
            claim,
            order_state,
            timestamp: opened_at,
            expires_at: opened_at + window,
            ..Default::default()
        }
    }

    /// Whether the dispute window has lapsed at `now`. The boundary counts
    /// as expired: a close attempted the instant of `expires_at` fails.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let opened = Utc::now();
        let case = DisputeCaseRecord::new(
            "case1".into(),
            "never arrived".into(),
            OrderState::Disputed,
            opened,
            Duration::hours(24),
        );

        assert!(!case.is_expired(opened));
        assert!(!case.is_expired(case.expires_at - Duration::seconds(1)));
        assert!(case.is_expired(case.expires_at));
        assert!(case.is_expired(case.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_new_case_is_unresolved() {
        let case = DisputeCaseRecord::new(
            "case1".into(),
            String::new(),
            OrderState::Disputed,
            Utc::now(),
            Duration::hours(1),
        );
        assert!(!case.is_resolved());
        assert!(case.buyer_contract.is_none());
        assert!(case.vendor_contract.is_none());
    }
}
