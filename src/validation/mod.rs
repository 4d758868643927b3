//! Structural validation of inbound documents.

pub mod listing;

pub use listing::{
    validate_listing, ListingValidationError, PRICE_MODIFIER_MAX, PRICE_MODIFIER_MIN,
};
