//! Error types for the research core and its HTTP surface.
//!
//! The core raises two recoverable kinds: [`SchemaError`] when a raw record
//! cannot be admitted and [`ParameterError`] when a parameter set is out of
//! its domain. [`ResearchError`] is the service-level enum; each variant maps
//! to a numeric code, an HTTP status code and a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::BatchId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1002,
///     "message": "invalid parameter: fee_rate must be within [0, 1], got 1.5",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`ResearchError`] code ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// One of the six required listing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    /// Capture time.
    Timestamp,
    /// Search category.
    Keyword,
    /// Display title.
    Name,
    /// Listing price in the source currency.
    Price,
    /// Cumulative units sold.
    Sales,
    /// Seller rating.
    ShopRating,
}

impl ListingField {
    /// Column name used in the flat file and in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Keyword => "keyword",
            Self::Name => "name",
            Self::Price => "price",
            Self::Sales => "sales",
            Self::ShopRating => "shop_rating",
        }
    }
}

impl std::fmt::Display for ListingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw record is missing a required field or carries a value of the wrong
/// semantic type. Rejects that single record only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The field is absent or blank.
    #[error("missing required field `{0}`")]
    Missing(ListingField),

    /// The field is present but its value is unusable.
    #[error("invalid `{field}` value {value:?}: {reason}")]
    Invalid {
        /// Offending field.
        field: ListingField,
        /// Raw value as received.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl SchemaError {
    /// Shorthand for [`SchemaError::Invalid`].
    #[must_use]
    pub fn invalid(field: ListingField, value: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            field,
            value: value.into(),
            reason,
        }
    }

    /// Field the error refers to.
    #[must_use]
    pub const fn field(&self) -> ListingField {
        match self {
            Self::Missing(field) | Self::Invalid { field, .. } => *field,
        }
    }
}

/// A parameter value lies outside its valid domain.
///
/// Raised before any derived field is touched, so a rejected recompute
/// leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Exchange rate must be finite and strictly positive.
    #[error("exchange_rate must be finite and > 0, got {0}")]
    ExchangeRate(f64),

    /// Fee rate must lie in `[0, 1]`.
    #[error("fee_rate must be within [0, 1], got {0}")]
    FeeRate(f64),

    /// Fixed cost must be finite.
    #[error("fixed_cost must be finite, got {0}")]
    FixedCost(f64),

    /// Cost rate must lie in `[0, 1]`.
    #[error("cost_rate must be within [0, 1], got {0}")]
    CostRate(f64),

    /// Premium markup must lie in `[0, 1]`.
    #[error("premium_rate must be within [0, 1], got {0}")]
    PremiumRate(f64),
}

/// Rejected change to the listing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The batch id was appended before.
    #[error("batch {0} was already appended")]
    DuplicateBatch(BatchId),
}

/// Service-level error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category             | HTTP Status                  |
/// |-----------|----------------------|------------------------------|
/// | 1000–1999 | Validation           | 400 Bad Request              |
/// | 2000–2999 | Not Found / Conflict | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server               | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A parameter set was rejected.
    #[error("invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    /// A raw record was rejected.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// No listing exists at the given store index.
    #[error("listing not found at index {0}")]
    ListingNotFound(usize),

    /// The fetch batch was already appended to the store.
    #[error("batch {0} was already appended")]
    DuplicateBatch(BatchId),

    /// Flat-file persistence failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Every listing source failed in a way that aborts the refresh.
    #[error("listing source error: {0}")]
    Source(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ResearchError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Parameter(_) => 1002,
            Self::Schema(_) => 1003,
            Self::ListingNotFound(_) => 2001,
            Self::DuplicateBatch(_) => 2002,
            Self::Internal(_) => 3000,
            Self::Persistence(_) => 3001,
            Self::Source(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Parameter(_) | Self::Schema(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ListingNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateBatch(_) => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Source(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ResearchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateBatch(id) => Self::DuplicateBatch(id),
        }
    }
}

impl From<csv::Error> for ResearchError {
    fn from(err: csv::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for ResearchError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl IntoResponse for ResearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            Self::Schema(err) => Some(err.field().to_string()),
            _ => None,
        };
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parameter_error_maps_to_bad_request() {
        let err = ResearchError::from(ParameterError::FeeRate(1.5));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1002);
        assert!(err.to_string().contains("fee_rate"));
    }

    #[test]
    fn schema_and_parameter_errors_are_distinguishable() {
        let schema = ResearchError::from(SchemaError::Missing(ListingField::Price));
        let param = ResearchError::from(ParameterError::ExchangeRate(-1.0));
        assert_ne!(schema.error_code(), param.error_code());
        assert!(matches!(schema, ResearchError::Schema(_)));
        assert!(matches!(param, ResearchError::Parameter(_)));
    }

    #[test]
    fn duplicate_batch_is_conflict() {
        let id = BatchId::new();
        let err = ResearchError::from(StoreError::DuplicateBatch(id));
        assert!(matches!(err, ResearchError::DuplicateBatch(got) if got == id));
        assert_eq!(err.error_code(), 2002);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn schema_error_reports_field() {
        let err = SchemaError::invalid(ListingField::Sales, "abc", "not an integer");
        assert_eq!(err.field(), ListingField::Sales);
        assert!(err.to_string().contains("sales"));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn error_response_has_status() {
        let response = ResearchError::ListingNotFound(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
