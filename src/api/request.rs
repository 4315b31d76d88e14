//! Request types for the Hotel Pricing Engine API.
//!
//! This module defines the JSON request structures for the
//! `/pricing/calculate` and `/supplements/price` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{PricingCriteria, RoomRequest, SupplementRequest};

/// Request body for the `/pricing/calculate` endpoint.
///
/// Mirrors [`PricingCriteria`], except that `total_nights` may be omitted
/// and is then derived from the stay dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRequest {
    /// The hotel to price.
    pub hotel_id: String,
    /// The market whose contract applies.
    pub market_id: String,
    /// The first night of the stay.
    pub check_in: NaiveDate,
    /// The departure date; this night is not charged.
    pub check_out: NaiveDate,
    /// The number of nights, checked against the dates when given.
    #[serde(default)]
    pub total_nights: Option<u32>,
    /// The rooms of the booking.
    pub rooms: Vec<RoomRequest>,
    /// Offers requested for the stay, in order of application.
    #[serde(default)]
    pub offer_ids: Vec<String>,
    /// Ancillary services requested for the stay.
    #[serde(default)]
    pub supplements: Vec<SupplementRequest>,
}

impl From<PricingRequest> for PricingCriteria {
    fn from(req: PricingRequest) -> Self {
        // A reversed range derives to zero nights and fails validation on check_out.
        let derived_nights = u32::try_from((req.check_out - req.check_in).num_days()).unwrap_or(0);

        PricingCriteria {
            hotel_id: req.hotel_id,
            market_id: req.market_id,
            check_in: req.check_in,
            check_out: req.check_out,
            total_nights: req.total_nights.unwrap_or(derived_nights),
            rooms: req.rooms,
            offer_ids: req.offer_ids,
            supplements: req.supplements,
        }
    }
}

/// Request body for the `/supplements/price` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementPriceRequest {
    /// The supplement to price.
    pub supplement_id: String,
    /// Number of units.
    pub quantity: u32,
    /// Number of nights, used by per-night units.
    pub nights: u32,
}
