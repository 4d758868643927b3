//! Dispute moderation configuration.
//!
//! A dispute case can only be resolved while its window is open. The window
//! length is configurable via `DISPUTE_WINDOW_HOURS`, clamped to sane bounds.

use std::env;

use chrono::Duration;

/// Default dispute window: 45 days.
pub const DEFAULT_DISPUTE_WINDOW_HOURS: i64 = 45 * 24;

/// Minimum window: below one hour a moderator cannot realistically act.
pub const MIN_DISPUTE_WINDOW_HOURS: i64 = 1;

/// Maximum window: a year-old dispute is stale by any standard.
pub const MAX_DISPUTE_WINDOW_HOURS: i64 = 365 * 24;

/// The configured dispute window.
///
/// Reads `DISPUTE_WINDOW_HOURS`, falling back to the default. Out-of-bounds
/// values are clamped rather than rejected.
pub fn dispute_window() -> Duration {
    let hours = env::var("DISPUTE_WINDOW_HOURS")
        .ok()
        .and_then(|v| v.parse().ok());
    Duration::hours(clamp_window_hours(hours))
}

fn clamp_window_hours(hours: Option<i64>) -> i64 {
    match hours {
        Some(h) if h < MIN_DISPUTE_WINDOW_HOURS => {
            tracing::warn!(
                hours = h,
                min = MIN_DISPUTE_WINDOW_HOURS,
                "DISPUTE_WINDOW_HOURS below minimum, using minimum"
            );
            MIN_DISPUTE_WINDOW_HOURS
        }
        Some(h) if h > MAX_DISPUTE_WINDOW_HOURS => {
            tracing::warn!(
                hours = h,
                max = MAX_DISPUTE_WINDOW_HOURS,
                "DISPUTE_WINDOW_HOURS above maximum, using maximum"
            );
            MAX_DISPUTE_WINDOW_HOURS
        }
        Some(h) => h,
        None => DEFAULT_DISPUTE_WINDOW_HOURS,
    }
}
