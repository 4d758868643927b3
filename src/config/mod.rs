//! Configuration for the marketplace domain engine.

pub mod currency;
pub mod moderation;

pub use currency::{CurrencyInfo, CurrencyRegistry, DEFAULT_COIN_DIVISIBILITY};
pub use moderation::{dispute_window, DEFAULT_DISPUTE_WINDOW_HOURS};
