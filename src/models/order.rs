//! Order (sale) records and the order lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::listing::Listing;

/// Lifecycle state of an order. Transitions between these are owned by
/// [`crate::services::orders::OrderService`]; nothing else mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Pending,
    AwaitingPayment,
    Funded,
    Shipped,
    Completed,
    Disputed,
    /// The moderator has decided the dispute; escrow still needs a release.
    Decided,
    Resolved,
    Canceled,
    Refunded,
    PaymentFinalized,
}

impl OrderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "PENDING",
            OrderState::AwaitingPayment => "AWAITING_PAYMENT",
            OrderState::Funded => "FUNDED",
            OrderState::Shipped => "SHIPPED",
            OrderState::Completed => "COMPLETED",
            OrderState::Disputed => "DISPUTED",
            OrderState::Decided => "DECIDED",
            OrderState::Resolved => "RESOLVED",
            OrderState::Canceled => "CANCELED",
            OrderState::Refunded => "REFUNDED",
            OrderState::PaymentFinalized => "PAYMENT_FINALIZED",
        }
    }

    /// Whether the order can still change state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Completed
                | OrderState::Resolved
                | OrderState::Canceled
                | OrderState::Refunded
                | OrderState::PaymentFinalized
        )
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for OrderState {
    fn default() -> Self {
        OrderState::Pending
    }
}

/// Buyer side of the contract: who is buying and how they pay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuyerOrder {
    pub buyer_id: String,
    /// Coin the buyer pays with. Empty means "first accepted currency of
    /// the listing".
    pub payment_coin: String,
    pub shipping_address: String,
    pub ship_to: String,
}

/// The signed listing plus the buyer's order terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contract {
    pub vendor_listings: Vec<Listing>,
    pub buyer_order: BuyerOrder,
}

impl Contract {
    pub fn new(listing: Listing, buyer_order: BuyerOrder) -> Self {
        Self {
            vendor_listings: vec![listing],
            buyer_order,
        }
    }

    /// Coin this order settles in: the buyer's explicit choice, else the
    /// first currency the listing accepts.
    pub fn payment_coin(&self) -> Option<&str> {
        if !self.buyer_order.payment_coin.is_empty() {
            return Some(&self.buyer_order.payment_coin);
        }
        self.vendor_listings
            .first()
            .and_then(|listing| listing.metadata.accepted_currencies.first())
            .map(String::as_str)
    }

    /// Coin being sold, for cryptocurrency listings.
    pub fn coin_type(&self) -> Option<&str> {
        self.vendor_listings
            .first()
            .map(|listing| listing.metadata.coin_type.as_str())
            .filter(|coin| !coin.is_empty())
    }
}

/// One record per transaction, shared by buyer, vendor and (optionally)
/// moderator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub order_id: String,
    pub contract: Contract,
    pub state: OrderState,
    pub timestamp: DateTime<Utc>,
}

impl SaleRecord {
    pub fn new(order_id: String, contract: Contract, timestamp: DateTime<Utc>) -> Self {
        Self {
            order_id,
            contract,
            state: OrderState::Pending,
            timestamp,
        }
    }
}
