//! In-process store.
//!
//! Keyed records live in `DashMap`s: the entry guard gives each record the
//! read-check-write atomicity the state machines need, while records with
//! different keys proceed without contention. The notification log is a
//! sequence-stamped `Vec` behind one `RwLock`, so a reader sees a single
//! point-in-time view of the whole feed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::error::{Error, RecordKind};
use crate::models::dispute::DisputeCaseRecord;
use crate::models::listing::Listing;
use crate::models::notification::{Notification, NotifierData};
use crate::models::order::{OrderState, SaleRecord};

use super::{CaseStore, ListingStore, NotificationStore, OrderStore};

/// One store for all four record families, sharable across workers.
#[derive(Default)]
pub struct MemoryStore {
    listings: DashMap<String, Listing>,
    orders: DashMap<String, SaleRecord>,
    cases: DashMap<String, DisputeCaseRecord>,
    notifications: RwLock<Vec<(u64, Notification)>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListingStore for MemoryStore {
    fn insert(&self, listing: Listing) -> Result<(), Error> {
        match self.listings.entry(listing.slug.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(Error::already_exists(
                RecordKind::Listing,
                listing.slug.clone(),
            )),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(listing);
                Ok(())
            }
        }
    }

    fn update(&self, listing: Listing) -> Result<(), Error> {
        match self.listings.get_mut(&listing.slug) {
            Some(mut stored) => {
                *stored = listing;
                Ok(())
            }
            None => Err(Error::not_found(RecordKind::Listing, listing.slug.clone())),
        }
    }

    fn get(&self, slug: &str) -> Result<Listing, Error> {
        self.listings
            .get(slug)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::not_found(RecordKind::Listing, slug))
    }

    fn delete(&self, slug: &str) -> Result<(), Error> {
        self.listings
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| Error::not_found(RecordKind::Listing, slug))
    }

    fn list(&self) -> Vec<Listing> {
        self.listings.iter().map(|entry| entry.clone()).collect()
    }
}

impl OrderStore for MemoryStore {
    fn put(&self, record: SaleRecord) -> Result<(), Error> {
        self.orders.insert(record.order_id.clone(), record);
        Ok(())
    }

    fn get(&self, order_id: &str) -> Result<SaleRecord, Error> {
        self.orders
            .get(order_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::not_found(RecordKind::Order, order_id))
    }

    fn transition(
        &self,
        order_id: &str,
        apply: &mut dyn FnMut(&mut SaleRecord) -> Result<OrderState, Error>,
    ) -> Result<OrderState, Error> {
        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| Error::not_found(RecordKind::Order, order_id))?;
        // Work on a draft so a failed precondition leaves the record as-is.
        let mut draft = entry.clone();
        let new_state = apply(&mut draft)?;
        *entry = draft;
        Ok(new_state)
    }

    fn list(&self) -> Vec<SaleRecord> {
        self.orders.iter().map(|entry| entry.clone()).collect()
    }
}

impl CaseStore for MemoryStore {
    fn put_record(&self, case: DisputeCaseRecord) -> Result<(), Error> {
        match self.cases.entry(case.case_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(Error::already_exists(RecordKind::Case, case.case_id.clone()))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(case);
                Ok(())
            }
        }
    }

    fn get(&self, case_id: &str) -> Result<DisputeCaseRecord, Error> {
        self.cases
            .get(case_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::not_found(RecordKind::Case, case_id))
    }

    fn mutate(
        &self,
        case_id: &str,
        apply: &mut dyn FnMut(&mut DisputeCaseRecord) -> Result<(), Error>,
    ) -> Result<(), Error> {
        let mut entry = self
            .cases
            .get_mut(case_id)
            .ok_or_else(|| Error::not_found(RecordKind::Case, case_id))?;
        let mut draft = entry.clone();
        apply(&mut draft)?;
        *entry = draft;
        Ok(())
    }

    fn list(&self) -> Vec<DisputeCaseRecord> {
        self.cases.iter().map(|entry| entry.clone()).collect()
    }
}

impl NotificationStore for MemoryStore {
    fn append(&self, data: NotifierData, created_at: DateTime<Utc>) -> Notification {
        let notification = Notification {
            id: data.notification_id().to_string(),
            created_at,
            notifier_data: data,
            read: false,
        };
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let mut log = self
            .notifications
            .write()
            .unwrap_or_else(|e| e.into_inner());
        log.push((seq, notification.clone()));
        notification
    }

    fn mark_read(&self, id: &str) -> Result<bool, Error> {
        let mut log = self
            .notifications
            .write()
            .unwrap_or_else(|e| e.into_inner());
        for (_, notification) in log.iter_mut() {
            if notification.id == id {
                let flipped = !notification.read;
                notification.read = true;
                return Ok(flipped);
            }
        }
        Err(Error::not_found(RecordKind::Notification, id))
    }

    fn snapshot(&self) -> Vec<(u64, Notification)> {
        self.notifications
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::Contract;

    fn sale(order_id: &str) -> SaleRecord {
        SaleRecord::new(order_id.into(), Contract::default(), Utc::now())
    }

    #[test]
    fn test_duplicate_slug_conflicts_until_deleted() {
        let store = MemoryStore::new();
        let listing = Listing {
            slug: "tshirt".into(),
            ..Default::default()
        };

        ListingStore::insert(&store, listing.clone()).unwrap();
        let err = ListingStore::insert(&store, listing.clone()).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));

        ListingStore::delete(&store, "tshirt").unwrap();
        ListingStore::insert(&store, listing).unwrap();
    }

    #[test]
    fn test_failed_transition_leaves_record_untouched() {
        let store = MemoryStore::new();
        OrderStore::put(&store, sale("order1")).unwrap();

        let err = OrderStore::transition(&store, "order1", &mut |record| {
            record.state = OrderState::Funded;
            Err(Error::BadInput("forced failure".into()))
        })
        .unwrap_err();
        assert!(matches!(err, Error::BadInput(_)));
        assert_eq!(
            OrderStore::get(&store, "order1").unwrap().state,
            OrderState::Pending
        );
    }

    #[test]
    fn test_transition_on_unknown_order_is_not_found() {
        let store = MemoryStore::new();
        let err = OrderStore::transition(&store, "nope", &mut |_| Ok(OrderState::Funded))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_append_assigns_monotonic_sequence() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for i in 0..3 {
            store.append(
                NotifierData::Follow {
                    notification_id: format!("notif{i}"),
                    peer_id: "peer".into(),
                },
                now,
            );
        }
        let snapshot = store.snapshot();
        let sequences: Vec<u64> = snapshot.iter().map(|(seq, _)| *seq).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[test]
    fn test_mark_read_flips_once() {
        let store = MemoryStore::new();
        store.append(
            NotifierData::Follow {
                notification_id: "notif1".into(),
                peer_id: "peer".into(),
            },
            Utc::now(),
        );

        assert!(store.mark_read("notif1").unwrap());
        assert!(!store.mark_read("notif1").unwrap());
        assert!(matches!(
            store.mark_read("ghost").unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
