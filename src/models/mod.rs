//! Domain records: listings, orders, dispute cases, notifications.

pub mod dispute;
pub mod listing;
pub mod notification;
pub mod order;
