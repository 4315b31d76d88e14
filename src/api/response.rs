//! Response types for the Hotel Pricing Engine API.
//!
//! This module defines the success envelopes and the error response
//! structures and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{PricingResult, SupplementUnit};

/// Successful response of the `/pricing/calculate` endpoint.
///
/// Wraps the deterministic [`PricingResult`] with the per-request identity
/// and timing data the engine itself never produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Unique identifier of this quote.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that priced the stay.
    pub engine_version: String,
    /// Time spent pricing, in microseconds.
    pub duration_us: u64,
    /// The priced stay.
    pub pricing: PricingResult,
}

/// Successful response of the `/supplements/price` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementPriceResponse {
    /// The supplement priced.
    pub supplement_id: String,
    /// The supplement's pricing unit.
    pub unit: SupplementUnit,
    /// The undiscounted amount.
    pub raw_amount: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn bad_request(code: &str, message: String, details: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::with_details(code, message, details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::CatalogNotFound { .. }
            | EngineError::CatalogParseError { .. }
            | EngineError::InvalidCatalog { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CATALOG_ERROR", "Catalog error", message),
            },
            EngineError::InvalidCriteria { .. } => Self::bad_request(
                "INVALID_CRITERIA",
                message,
                "The pricing criteria contain inconsistent information",
            ),
            EngineError::ContractNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "CONTRACT_NOT_FOUND",
                    message,
                    "The hotel has no contract for the requested market",
                ),
            },
            EngineError::PeriodNotFound { .. } => Self::bad_request(
                "PERIOD_NOT_FOUND",
                message,
                "Every night of the stay must be covered by a contract period",
            ),
            EngineError::StopSale { .. } => Self::bad_request(
                "STOP_SALE",
                message,
                "The hotel is closed to sale on a night of the stay",
            ),
            EngineError::MinimumStayNotMet { .. } => Self::bad_request(
                "MINIMUM_STAY_NOT_MET",
                message,
                "The stay is shorter than the contract period allows",
            ),
            EngineError::RoomTypeNotPriced { .. } => Self::bad_request(
                "ROOM_TYPE_NOT_PRICED",
                message,
                "The requested room type is not sold in a period of the stay",
            ),
            EngineError::UnresolvedOccupancy { .. } => Self::bad_request(
                "UNRESOLVED_OCCUPANCY",
                message,
                "The room type has no rate for the requested number of guests",
            ),
            EngineError::MealPlanNotAvailable { .. } => Self::bad_request(
                "MEAL_PLAN_NOT_AVAILABLE",
                message,
                "The requested meal plan is not sold in a period of the stay",
            ),
            EngineError::UnresolvedMealPlanOccupancy { .. } => Self::bad_request(
                "UNRESOLVED_MEAL_PLAN_OCCUPANCY",
                message,
                "The meal plan has no surcharge for the requested number of guests",
            ),
            EngineError::UnknownOffer { .. } => Self::bad_request(
                "UNKNOWN_OFFER",
                message,
                "The requested offer is not in the catalog",
            ),
            EngineError::UnknownSupplement { .. } => Self::bad_request(
                "UNKNOWN_SUPPLEMENT",
                message,
                "The requested supplement is not in the catalog",
            ),
        }
    }
}
