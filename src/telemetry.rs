//! Tracing initialization.
//!
//! The process wiring (exporters, log shipping) belongs to the host binary;
//! the engine only needs a subscriber so its `tracing` events go somewhere.
//! Filter with `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. Safe to call more than once; later calls
/// are no-ops, which keeps parallel tests happy.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
