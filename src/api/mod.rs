//! Gateway boundary types.
//!
//! The HTTP layer lives outside this crate; these are the JSON bodies it
//! exchanges with clients. Every failure serializes to the same stable shape,
//! `{"success": false, "reason": "..."}`, with the transport status taken
//! from [`Error::status_code`].

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use crate::models::notification::{NotificationView, NotificationsResponse};

/// Stable error body for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    pub reason: String,
}

impl ErrorBody {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: reason.into(),
        }
    }
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Body of a successful listing creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlugResponse {
    pub slug: String,
}

/// The `{}` body returned by successful mutations with nothing to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordKind;

    #[test]
    fn test_error_body_shape_is_stable() {
        let err = Error::not_found(RecordKind::Listing, "ron-swanson-tshirt");
        let body = ErrorBody::from(&err);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["reason"], "listing ron-swanson-tshirt not found");
    }

    #[test]
    fn test_validation_reason_names_the_field_path() {
        let err = Error::Validation(
            crate::validation::ListingValidationError::CryptocurrencyIllegalField(
                "item.condition".into(),
            ),
        );
        let body = ErrorBody::from(&err);
        assert!(body.reason.contains("item.condition"));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_empty_response_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&EmptyResponse {}).unwrap(), "{}");
    }
}
