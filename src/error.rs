//! Domain error taxonomy.
//!
//! Every failure a core operation can report is one of these variants, so the
//! gateway can tell "wrong time" (state conflict) from "never possible"
//! (capability) from "unknown id" (not found) without parsing messages.

use thiserror::Error;

use crate::models::order::OrderState;
use crate::validation::ListingValidationError;

/// Which record family an id refers to. Used by not-found / conflict errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Listing,
    Order,
    Case,
    Notification,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordKind::Listing => "listing",
            RecordKind::Order => "order",
            RecordKind::Case => "dispute case",
            RecordKind::Notification => "notification",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Request body could not be deserialized. Reported before any state is
    /// touched.
    #[error("malformed request: {0}")]
    Malformed(String),

    /// Input parsed but is semantically unusable (e.g. payout percentages
    /// that do not sum to 100).
    #[error("{0}")]
    BadInput(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: String },

    /// Duplicate id. Never silently overwrites.
    #[error("{kind} {id} already exists")]
    AlreadyExists { kind: RecordKind, id: String },

    /// Listing content violates the domain rules in [`crate::validation`].
    #[error(transparent)]
    Validation(#[from] ListingValidationError),

    /// The requested action is structurally impossible for this coin,
    /// regardless of order state.
    #[error("coin {coin} does not support programmatic escrow release")]
    ReleaseNotSupported { coin: String },

    /// A transition was requested from an incompatible state.
    #[error("cannot {attempted} order in state {current}")]
    StateConflict {
        current: OrderState,
        attempted: &'static str,
    },

    /// The dispute window has lapsed; resolution is permanently blocked.
    #[error("dispute case {case_id} has expired and can no longer be resolved")]
    CaseExpired { case_id: String },

    #[error("dispute case {case_id} is already resolved")]
    CaseAlreadyResolved { case_id: String },
}

impl Error {
    pub fn not_found(kind: RecordKind, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn already_exists(kind: RecordKind, id: impl Into<String>) -> Self {
        Error::AlreadyExists {
            kind,
            id: id.into(),
        }
    }

    /// Transport status the gateway maps this failure to.
    ///
    /// Validation failures surface as 500 on the original wire contract;
    /// everything else client-correctable is 400/404/409.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Malformed(_)
            | Error::BadInput(_)
            | Error::ReleaseNotSupported { .. }
            | Error::StateConflict { .. }
            | Error::CaseExpired { .. }
            | Error::CaseAlreadyResolved { .. } => 400,
            Error::NotFound { .. } => 404,
            Error::AlreadyExists { .. } => 409,
            Error::Validation(_) => 500,
        }
    }
}
