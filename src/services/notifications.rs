//! Notification feed.
//!
//! Append-only event log with deterministic, cursor-based pagination.
//! Timestamps have second resolution, so batches of events collide; ties are
//! broken by reverse insertion order (the most recently created sorts first).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::Error;
use crate::models::notification::{
    Notification, NotificationView, NotificationsResponse, NotifierData,
};
use crate::store::NotificationStore;

pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Append an event at the current time. Assigns an id when the payload
    /// does not carry one yet.
    pub fn record(&self, data: NotifierData) -> Notification {
        // Second resolution on the wire; drop the subsecond part up front so
        // stored and served timestamps agree.
        let now = self.clock.now();
        let created_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        self.record_at(data, created_at)
    }

    /// Append an event with an explicit timestamp (peer-delivered events
    /// keep their original creation time).
    pub fn record_at(&self, mut data: NotifierData, created_at: DateTime<Utc>) -> Notification {
        if data.notification_id().is_empty() {
            data.set_notification_id(Uuid::new_v4().to_string());
        }
        let notification = self.store.append(data, created_at);
        debug!(id = %notification.id, kind = notification.notifier_data.notifier_type(), "notification recorded");
        notification
    }

    /// One page of the feed, newest first.
    ///
    /// `offset_id` is a cursor: the page starts strictly after that
    /// notification; an unknown cursor yields the full window. `total` is the
    /// size of the window the cursor exposes, before `limit` caps it.
    /// `limit <= 0` means no cap. `unread` is global, cursor-independent.
    pub fn list(&self, limit: i64, offset_id: Option<&str>) -> NotificationsResponse {
        let mut snapshot = self.store.snapshot();
        snapshot.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });

        let unread = snapshot.iter().filter(|(_, n)| !n.read).count();

        let start = offset_id
            .and_then(|id| snapshot.iter().position(|(_, n)| n.id == id))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let window = &snapshot[start..];
        let total = window.len();

        let visible = if limit <= 0 {
            window
        } else {
            &window[..window.len().min(limit as usize)]
        };

        NotificationsResponse {
            notifications: visible
                .iter()
                .map(|(_, n)| NotificationView::from(n))
                .collect(),
            total,
            unread,
        }
    }

    /// Flip a notification's read flag; flips at most once, never back.
    pub fn mark_read(&self, id: &str) -> Result<(), Error> {
        self.store.mark_read(id).map(|_| ())
    }
}
