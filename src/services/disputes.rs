//! Dispute case manager.
//!
//! Case lifecycle: OPEN, then either resolved through [`DisputeService::close`]
//! or expired by the wall clock. Expiry is evaluated at call time against the
//! injected clock; an expired case can never be closed.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::Error;
use crate::models::dispute::{DisputeCaseRecord, DisputeResolution};
use crate::models::order::{Contract, OrderState};
use crate::store::CaseStore;

/// Tolerance for the percentage sum check; payouts are quoted to two
/// decimal places.
const PERCENT_SUM_EPSILON: f64 = 1e-6;

pub struct DisputeService {
    store: Arc<dyn CaseStore>,
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl DisputeService {
    pub fn new(store: Arc<dyn CaseStore>, clock: Arc<dyn Clock>, window: Duration) -> Self {
        Self {
            store,
            clock,
            window,
        }
    }

    /// Open a new case. The dispute window starts now; `caseId` collisions
    /// fail with already-exists.
    pub fn open(
        &self,
        case_id: &str,
        claim: &str,
        order_state: OrderState,
    ) -> Result<DisputeCaseRecord, Error> {
        let case = DisputeCaseRecord::new(
            case_id.to_string(),
            claim.to_string(),
            order_state,
            self.clock.now(),
            self.window,
        );
        self.store.put_record(case.clone())?;
        info!(case_id = %case_id, expires_at = %case.expires_at, "dispute case opened");
        Ok(case)
    }

    /// Insert a pre-built case record (e.g. one received from a peer).
    pub fn put_record(&self, case: DisputeCaseRecord) -> Result<(), Error> {
        self.store.put_record(case)
    }

    /// Attach the buyer's settlement data. Independent of the vendor-side
    /// update and callable in any order relative to it.
    pub fn update_buyer_info(
        &self,
        case_id: &str,
        contract: Contract,
        outpoints: Vec<String>,
        payout_address: String,
    ) -> Result<(), Error> {
        self.store.mutate(case_id, &mut |case| {
            if case.is_resolved() {
                return Err(Error::CaseAlreadyResolved {
                    case_id: case_id.to_string(),
                });
            }
            case.buyer_contract = Some(contract.clone());
            case.buyer_outpoints = outpoints.clone();
            case.buyer_payout_address = payout_address.clone();
            Ok(())
        })
    }

    /// Attach the vendor's settlement data; mirror of
    /// [`Self::update_buyer_info`].
    pub fn update_vendor_info(
        &self,
        case_id: &str,
        contract: Contract,
        outpoints: Vec<String>,
        payout_address: String,
    ) -> Result<(), Error> {
        self.store.mutate(case_id, &mut |case| {
            if case.is_resolved() {
                return Err(Error::CaseAlreadyResolved {
                    case_id: case_id.to_string(),
                });
            }
            case.vendor_contract = Some(contract.clone());
            case.vendor_outpoints = outpoints.clone();
            case.vendor_payout_address = payout_address.clone();
            Ok(())
        })
    }

    /// Record the moderator's resolution and close the case.
    ///
    /// The expiry guard is non-negotiable: once `expires_at` has passed, a
    /// moderator can no longer force a payout split, full stop.
    pub fn close(
        &self,
        case_id: &str,
        resolution: &str,
        buyer_percentage: f64,
        vendor_percentage: f64,
    ) -> Result<(), Error> {
        if (buyer_percentage + vendor_percentage - 100.0).abs() > PERCENT_SUM_EPSILON {
            return Err(Error::BadInput(format!(
                "dispute payout percentages must sum to 100, got {} + {}",
                buyer_percentage, vendor_percentage
            )));
        }

        let now = self.clock.now();
        self.store.mutate(case_id, &mut |case| {
            if case.is_resolved() {
                return Err(Error::CaseAlreadyResolved {
                    case_id: case_id.to_string(),
                });
            }
            if case.is_expired(now) {
                warn!(case_id = %case_id, expires_at = %case.expires_at, "close rejected, dispute window lapsed");
                return Err(Error::CaseExpired {
                    case_id: case_id.to_string(),
                });
            }
            case.resolution = Some(DisputeResolution {
                resolution: resolution.to_string(),
                buyer_percentage,
                vendor_percentage,
                decided_at: Some(now),
            });
            Ok(())
        })?;
        info!(case_id = %case_id, buyer_percentage, vendor_percentage, "dispute case closed");
        Ok(())
    }

    pub fn get(&self, case_id: &str) -> Result<DisputeCaseRecord, Error> {
        self.store.get(case_id)
    }

    pub fn list(&self) -> Vec<DisputeCaseRecord> {
        self.store.list()
    }
}
