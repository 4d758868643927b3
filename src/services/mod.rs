//! Core services the gateway calls into.
//!
//! Each service is stateless logic over the store traits; all state lives in
//! the store. Operations are synchronous and short-lived.

pub mod disputes;
pub mod listings;
pub mod notifications;
pub mod orders;

pub use disputes::DisputeService;
pub use listings::ListingService;
pub use notifications::NotificationService;
pub use orders::OrderService;
