//! Narrow persistence contracts.
//!
//! The durable store is an external collaborator; the services only need
//! get-by-id, put and list-with-filter, plus an atomic read-check-write on a
//! single record for state transitions. [`memory::MemoryStore`] is the
//! in-process reference implementation the tests run against.

pub mod memory;

use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::models::dispute::DisputeCaseRecord;
use crate::models::listing::Listing;
use crate::models::notification::Notification;
use crate::models::order::{OrderState, SaleRecord};

pub use memory::MemoryStore;

/// Listings keyed by slug. A slug is unique among live listings only;
/// deletion frees it.
pub trait ListingStore: Send + Sync {
    /// Insert a new listing; fails with already-exists if the slug is live.
    fn insert(&self, listing: Listing) -> Result<(), Error>;
    /// Replace an existing listing; fails with not-found for unknown slugs.
    fn update(&self, listing: Listing) -> Result<(), Error>;
    fn get(&self, slug: &str) -> Result<Listing, Error>;
    /// Remove the listing and free its slug.
    fn delete(&self, slug: &str) -> Result<(), Error>;
    fn list(&self) -> Vec<Listing>;
}

/// Sale records keyed by order id.
pub trait OrderStore: Send + Sync {
    /// Insert or replace the record.
    fn put(&self, record: SaleRecord) -> Result<(), Error>;
    fn get(&self, order_id: &str) -> Result<SaleRecord, Error>;
    /// Run `apply` against the record under the store's single-writer
    /// discipline. The mutation is committed only when `apply` returns `Ok`;
    /// on `Err` the stored record is untouched.
    fn transition(
        &self,
        order_id: &str,
        apply: &mut dyn FnMut(&mut SaleRecord) -> Result<OrderState, Error>,
    ) -> Result<OrderState, Error>;
    fn list(&self) -> Vec<SaleRecord>;
}

/// Dispute cases keyed by case id.
pub trait CaseStore: Send + Sync {
    /// Insert a new case; fails with already-exists on id collision.
    fn put_record(&self, case: DisputeCaseRecord) -> Result<(), Error>;
    fn get(&self, case_id: &str) -> Result<DisputeCaseRecord, Error>;
    /// Atomic read-check-write, same contract as [`OrderStore::transition`].
    fn mutate(
        &self,
        case_id: &str,
        apply: &mut dyn FnMut(&mut DisputeCaseRecord) -> Result<(), Error>,
    ) -> Result<(), Error>;
    fn list(&self) -> Vec<DisputeCaseRecord>;
}

/// Append-only notification log.
pub trait NotificationStore: Send + Sync {
    /// Append a notification and assign its insertion sequence.
    fn append(&self, data: crate::models::notification::NotifierData, created_at: DateTime<Utc>)
        -> Notification;
    /// Flip the read flag. `Ok(true)` if this call flipped it, `Ok(false)`
    /// if it was already read.
    fn mark_read(&self, id: &str) -> Result<bool, Error>;
    /// A single consistent snapshot of `(sequence, notification)` pairs, in
    /// insertion order. Ordering and counting must both be computed from one
    /// snapshot so a page never tears.
    fn snapshot(&self) -> Vec<(u64, Notification)>;
}
