//! Notification records and their wire shape.
//!
//! A notification is written once and never mutated, except for the `read`
//! flag which flips exactly once. The event payload is a closed tagged union:
//! ordering and rendering code match on it exhaustively, so a new variant is
//! a compile error everywhere it matters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event-specific payload, tagged with the event kind on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotifierData {
    #[serde(rename_all = "camelCase")]
    Follow {
        notification_id: String,
        peer_id: String,
    },
    #[serde(rename_all = "camelCase")]
    Unfollow {
        notification_id: String,
        peer_id: String,
    },
    /// A vendor received a new order.
    #[serde(rename_all = "camelCase")]
    Order {
        notification_id: String,
        order_id: String,
        buyer_id: String,
        title: String,
    },
    #[serde(rename_all = "camelCase")]
    Payment {
        notification_id: String,
        order_id: String,
        funding_total: u64,
    },
    #[serde(rename_all = "camelCase")]
    DisputeOpen {
        notification_id: String,
        order_id: String,
    },
    #[serde(rename_all = "camelCase")]
    DisputeClose {
        notification_id: String,
        order_id: String,
    },
}

impl NotifierData {
    /// Wire name of the event kind, duplicated at the top level of the
    /// notification envelope.
    pub fn notifier_type(&self) -> &'static str {
        match self {
            NotifierData::Follow { .. } => "follow",
            NotifierData::Unfollow { .. } => "unfollow",
            NotifierData::Order { .. } => "order",
            NotifierData::Payment { .. } => "payment",
            NotifierData::DisputeOpen { .. } => "disputeOpen",
            NotifierData::DisputeClose { .. } => "disputeClose",
        }
    }

    pub fn notification_id(&self) -> &str {
        match self {
            NotifierData::Follow {
                notification_id, ..
            }
            | NotifierData::Unfollow {
                notification_id, ..
            }
            | NotifierData::Order {
                notification_id, ..
            }
            | NotifierData::Payment {
                notification_id, ..
            }
            | NotifierData::DisputeOpen {
                notification_id, ..
            }
            | NotifierData::DisputeClose {
                notification_id, ..
            } => notification_id,
        }
    }

    pub(crate) fn set_notification_id(&mut self, id: String) {
        match self {
            NotifierData::Follow {
                notification_id, ..
            }
            | NotifierData::Unfollow {
                notification_id, ..
            }
            | NotifierData::Order {
                notification_id, ..
            }
            | NotifierData::Payment {
                notification_id, ..
            }
            | NotifierData::DisputeOpen {
                notification_id, ..
            }
            | NotifierData::DisputeClose {
                notification_id, ..
            } => *notification_id = id,
        }
    }
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Second-resolution creation time; collisions across a batch are
    /// expected and resolved by insertion order.
    pub created_at: DateTime<Utc>,
    pub notifier_data: NotifierData,
    pub read: bool,
}

/// One notification as the gateway serves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub notification: NotifierData,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub notifier_type: String,
}

impl From<&Notification> for NotificationView {
    fn from(n: &Notification) -> Self {
        Self {
            notification: n.notifier_data.clone(),
            read: n.read,
            timestamp: n.created_at,
            notifier_type: n.notifier_data.notifier_type().to_string(),
        }
    }
}

/// One page of the feed.
///
/// `total` counts the window the cursor exposes (the grand total when no
/// cursor is given); `unread` is always the global never-read count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationView>,
    pub total: usize,
    pub unread: usize,
}
