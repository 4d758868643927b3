//! Order/escrow state machine.
//!
//! Transitions are invoked by name against a loaded order. Each one runs as
//! an atomic read-check-write under the store's per-record lock: it either
//! commits the new state or fails with a specific error and leaves the record
//! untouched. Escrow release is additionally gated on the payment coin's
//! release capability, checked before any state logic so a non-capable coin
//! fails the same way in every state.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::CurrencyRegistry;
use crate::error::Error;
use crate::models::notification::NotifierData;
use crate::models::order::{Contract, OrderState, SaleRecord};
use crate::services::disputes::DisputeService;
use crate::services::notifications::NotificationService;
use crate::store::OrderStore;
use crate::validation::validate_listing;

pub struct OrderService {
    store: Arc<dyn OrderStore>,
    disputes: Arc<DisputeService>,
    notifications: Arc<NotificationService>,
    currencies: CurrencyRegistry,
    clock: Arc<dyn Clock>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        disputes: Arc<DisputeService>,
        notifications: Arc<NotificationService>,
        currencies: CurrencyRegistry,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            disputes,
            notifications,
            currencies,
            clock,
        }
    }

    /// Accept a new order. The contract's listings are validated before the
    /// record is written; the order starts in PENDING.
    pub fn create(
        &self,
        order_id: Option<String>,
        contract: Contract,
    ) -> Result<SaleRecord, Error> {
        for listing in &contract.vendor_listings {
            validate_listing(listing, &self.currencies)?;
        }
        let order_id = order_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let record = SaleRecord::new(order_id.clone(), contract, self.clock.now());
        self.store.put(record.clone())?;

        self.notifications.record(NotifierData::Order {
            notification_id: String::new(),
            order_id: order_id.clone(),
            buyer_id: record.contract.buyer_order.buyer_id.clone(),
            title: record
                .contract
                .vendor_listings
                .first()
                .map(|l| l.item.title.clone())
                .unwrap_or_default(),
        });
        info!(order_id = %order_id, "order created");
        Ok(record)
    }

    /// Seed a pre-built record, e.g. one reconstructed from a peer message.
    pub fn put(&self, record: SaleRecord) -> Result<(), Error> {
        self.store.put(record)
    }

    pub fn get(&self, order_id: &str) -> Result<SaleRecord, Error> {
        self.store.get(order_id)
    }

    pub fn list(&self) -> Vec<SaleRecord> {
        self.store.list()
    }

    /// Buyer funding arrived in escrow.
    pub fn fund(&self, order_id: &str) -> Result<OrderState, Error> {
        self.step(
            order_id,
            "fund",
            &[OrderState::Pending, OrderState::AwaitingPayment],
            OrderState::Funded,
        )
    }

    /// Vendor marked the order shipped.
    pub fn ship(&self, order_id: &str) -> Result<OrderState, Error> {
        self.step(order_id, "ship", &[OrderState::Funded], OrderState::Shipped)
    }

    /// Buyer confirmed completion.
    pub fn complete(&self, order_id: &str) -> Result<OrderState, Error> {
        self.step(
            order_id,
            "complete",
            &[OrderState::Funded, OrderState::Shipped],
            OrderState::Completed,
        )
    }

    /// Buyer canceled before funds moved.
    pub fn cancel(&self, order_id: &str) -> Result<OrderState, Error> {
        self.step(
            order_id,
            "cancel",
            &[OrderState::Pending, OrderState::AwaitingPayment],
            OrderState::Canceled,
        )
    }

    /// Vendor refunded the buyer in full.
    pub fn refund(&self, order_id: &str) -> Result<OrderState, Error> {
        self.step(
            order_id,
            "refund",
            &[OrderState::Funded, OrderState::Shipped],
            OrderState::Refunded,
        )
    }

    /// Release the escrowed funds to the vendor.
    ///
    /// Precondition, checked before the state: the payment coin must support
    /// programmatic release. A non-capable coin fails with a capability
    /// error in every state. A decided dispute finalizes the payment;
    /// regular releases complete the order.
    pub fn release_escrow(&self, order_id: &str) -> Result<OrderState, Error> {
        let new_state = self.store.transition(order_id, &mut |order| {
            let coin = order
                .contract
                .payment_coin()
                .ok_or_else(|| Error::BadInput("order has no payment coin".into()))?;
            if !self.currencies.supports_programmatic_release(coin) {
                return Err(Error::ReleaseNotSupported {
                    coin: coin.to_string(),
                });
            }

            let next = match order.state {
                OrderState::Funded | OrderState::Shipped => OrderState::Completed,
                OrderState::Decided => OrderState::PaymentFinalized,
                current => {
                    return Err(Error::StateConflict {
                        current,
                        attempted: "release escrow for",
                    })
                }
            };
            order.state = next;
            Ok(next)
        })?;
        info!(order_id = %order_id, state = %new_state, "escrow released");
        Ok(new_state)
    }

    /// Open a dispute on a funded or shipped order. Creates the case record
    /// (caseId == orderId) and moves the order to DISPUTED; a second attempt
    /// is a state conflict, not a new case.
    pub fn open_dispute(&self, order_id: &str, claim: &str) -> Result<OrderState, Error> {
        let new_state = self.store.transition(order_id, &mut |order| {
            match order.state {
                OrderState::Funded | OrderState::Shipped => {}
                current => {
                    return Err(Error::StateConflict {
                        current,
                        attempted: "open a dispute on",
                    })
                }
            }
            self.disputes.open(order_id, claim, order.state)?;
            order.state = OrderState::Disputed;
            Ok(OrderState::Disputed)
        })?;

        self.notifications.record(NotifierData::DisputeOpen {
            notification_id: String::new(),
            order_id: order_id.to_string(),
        });
        info!(order_id = %order_id, "dispute opened");
        Ok(new_state)
    }

    /// Moderator resolution: split the escrow per the given percentages and
    /// close both the case and the order.
    ///
    /// Delegates the expiry check to the dispute case manager; a lapsed
    /// window aborts with the order untouched.
    pub fn resolve_dispute(
        &self,
        order_id: &str,
        resolution: &str,
        buyer_percentage: f64,
        vendor_percentage: f64,
    ) -> Result<OrderState, Error> {
        let new_state = self.store.transition(order_id, &mut |order| {
            if order.state != OrderState::Disputed {
                return Err(Error::StateConflict {
                    current: order.state,
                    attempted: "resolve a dispute on",
                });
            }
            self.disputes
                .close(order_id, resolution, buyer_percentage, vendor_percentage)?;
            order.state = OrderState::Resolved;
            Ok(OrderState::Resolved)
        })?;

        self.notifications.record(NotifierData::DisputeClose {
            notification_id: String::new(),
            order_id: order_id.to_string(),
        });
        info!(order_id = %order_id, buyer_percentage, vendor_percentage, "dispute resolved");
        Ok(new_state)
    }

    fn step(
        &self,
        order_id: &str,
        attempted: &'static str,
        allowed: &[OrderState],
        to: OrderState,
    ) -> Result<OrderState, Error> {
        let new_state = self.store.transition(order_id, &mut |order| {
            if !allowed.contains(&order.state) {
                return Err(Error::StateConflict {
                    current: order.state,
                    attempted,
                });
            }
            order.state = to;
            Ok(to)
        })?;
        info!(order_id = %order_id, state = %new_state, "order transition applied");
        Ok(new_state)
    }
}
