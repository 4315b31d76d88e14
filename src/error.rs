//! Error types for the Hotel Pricing Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a price calculation or a catalog load.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Hotel Pricing Engine.
///
/// Pricing is all-or-nothing: every variant is fatal to the calculation that
/// produced it and no partial invoice is ever returned.
///
/// # Example
///
/// ```
/// use hotel_pricing_engine::error::EngineError;
///
/// let error = EngineError::CatalogNotFound {
///     path: "/missing/offers.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Catalog file not found: /missing/offers.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog file was not found at the specified path.
    #[error("Catalog file not found: {path}")]
    CatalogNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Catalog file could not be parsed.
    #[error("Failed to parse catalog file '{path}': {message}")]
    CatalogParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Catalog data parsed but breaks a structural rule.
    #[error("Invalid catalog: {message}")]
    InvalidCatalog {
        /// A description of the violated rule.
        message: String,
    },

    /// The pricing criteria were inconsistent.
    #[error("Invalid criteria field '{field}': {message}")]
    InvalidCriteria {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No contract exists for the hotel and market.
    #[error("No contract found for hotel '{hotel_id}' in market '{market_id}'")]
    ContractNotFound {
        /// The requested hotel.
        hotel_id: String,
        /// The requested market.
        market_id: String,
    },

    /// No contract period covers a night of the stay.
    #[error("No contract period covers the night of {date}")]
    PeriodNotFound {
        /// The uncovered night.
        date: NaiveDate,
    },

    /// A night of the stay falls on a stop-sale date.
    #[error("Stop sale on {date} in period '{period_id}'")]
    StopSale {
        /// The blocked night.
        date: NaiveDate,
        /// The period declaring the stop sale.
        period_id: String,
    },

    /// The stay is shorter than a covering period's minimum stay.
    #[error("Period '{period_id}' requires a minimum stay of {min_stay} nights, got {nights}")]
    MinimumStayNotMet {
        /// The period imposing the minimum.
        period_id: String,
        /// The required number of nights.
        min_stay: u32,
        /// The number of nights requested.
        nights: u32,
    },

    /// A covering period has no price for the requested room type.
    #[error("Room type '{room_type_id}' has no price in period '{period_id}'")]
    RoomTypeNotPriced {
        /// The requested room type.
        room_type_id: String,
        /// The covering period.
        period_id: String,
    },

    /// A per-occupancy room price has no row for the exact occupancy.
    #[error(
        "No occupancy rate for room type '{room_type_id}' with {num_adults} adults and {num_children} children"
    )]
    UnresolvedOccupancy {
        /// The requested room type.
        room_type_id: String,
        /// Number of adults requested.
        num_adults: u32,
        /// Number of children requested.
        num_children: u32,
    },

    /// A covering period does not offer the requested meal plan.
    #[error("Meal plan '{meal_plan_id}' is not available in period '{period_id}'")]
    MealPlanNotAvailable {
        /// The requested meal plan.
        meal_plan_id: String,
        /// The covering period.
        period_id: String,
    },

    /// A meal plan surcharge table has no row for the exact occupancy.
    #[error(
        "No surcharge for meal plan '{meal_plan_id}' with {num_adults} adults and {num_children} children"
    )]
    UnresolvedMealPlanOccupancy {
        /// The requested meal plan.
        meal_plan_id: String,
        /// Number of adults requested.
        num_adults: u32,
        /// Number of children requested.
        num_children: u32,
    },

    /// A requested offer id is not present in the catalog.
    #[error("Unknown offer: {offer_id}")]
    UnknownOffer {
        /// The offer id that was not found.
        offer_id: String,
    },

    /// A requested supplement id is not present in the catalog.
    #[error("Unknown supplement: {supplement_id}")]
    UnknownSupplement {
        /// The supplement id that was not found.
        supplement_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
