//! Pricing criteria: the stay a caller wants priced.
//!
//! This module contains the [`PricingCriteria`] type with its room and
//! supplement requests, and the validation run before any pricing happens.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::OccupancyKey;
use crate::error::{EngineError, EngineResult};

/// One room of the stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRequest {
    /// The room type to price.
    pub room_type_id: String,
    /// Number of adults in the room.
    pub num_adults: u32,
    /// Number of children in the room.
    #[serde(default)]
    pub num_children: u32,
    /// Ages of the children, when known.
    #[serde(default)]
    pub children_ages: Vec<u8>,
    /// Requested meal plan; `None` keeps the period's base plan.
    #[serde(default)]
    pub meal_plan_id: Option<String>,
}

impl RoomRequest {
    /// Returns the occupancy of this room.
    pub fn occupancy(&self) -> OccupancyKey {
        OccupancyKey::new(self.num_adults, self.num_children)
    }
}

/// An ancillary supplement requested with the stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementRequest {
    /// The supplement to price.
    pub supplement_id: String,
    /// Number of units (persons or rooms depending on the supplement unit).
    pub quantity: u32,
}

/// A complete request to price a hotel stay.
///
/// Nights run from `check_in` up to but excluding `check_out`.
///
/// # Example
///
/// ```
/// use hotel_pricing_engine::models::{PricingCriteria, RoomRequest};
/// use chrono::NaiveDate;
///
/// let criteria = PricingCriteria {
///     hotel_id: "riviera".to_string(),
///     market_id: "uk".to_string(),
///     check_in: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
///     check_out: NaiveDate::from_ymd_opt(2026, 7, 4).unwrap(),
///     total_nights: 3,
///     rooms: vec![RoomRequest {
///         room_type_id: "double".to_string(),
///         num_adults: 2,
///         num_children: 0,
///         children_ages: vec![],
///         meal_plan_id: None,
///     }],
///     offer_ids: vec![],
///     supplements: vec![],
/// };
///
/// assert!(criteria.validate().is_ok());
/// assert_eq!(criteria.nights().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingCriteria {
    /// The hotel being booked.
    pub hotel_id: String,
    /// The source market of the booking.
    pub market_id: String,
    /// Arrival date; the first night priced.
    pub check_in: NaiveDate,
    /// Departure date; not priced.
    pub check_out: NaiveDate,
    /// Number of nights, which must equal `check_out - check_in`.
    pub total_nights: u32,
    /// Rooms to price, in the order they appear on the invoice.
    pub rooms: Vec<RoomRequest>,
    /// Requested offers; the order is kept when composing discounts.
    #[serde(default)]
    pub offer_ids: Vec<String>,
    /// Requested ancillary supplements.
    #[serde(default)]
    pub supplements: Vec<SupplementRequest>,
}

impl PricingCriteria {
    /// Returns the number of nights between check-in and check-out.
    pub fn stay_length(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Iterates over the nights of the stay in chronological order.
    pub fn nights(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.check_in
            .iter_days()
            .take_while(move |d| *d < self.check_out)
    }

    /// Checks that the criteria are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCriteria` when:
    /// - `check_out` is not after `check_in`
    /// - `total_nights` disagrees with the date range
    /// - no rooms are requested, or a room has no adults
    /// - a room lists children ages that do not match its child count
    /// - a supplement is requested with a zero quantity
    pub fn validate(&self) -> EngineResult<()> {
        let stay_length = self.stay_length();
        if stay_length <= 0 {
            return Err(invalid("check_out", "must be after check_in"));
        }

        if i64::from(self.total_nights) != stay_length {
            return Err(invalid(
                "total_nights",
                format!(
                    "is {} but the stay from {} to {} has {} nights",
                    self.total_nights, self.check_in, self.check_out, stay_length
                ),
            ));
        }

        if self.rooms.is_empty() {
            return Err(invalid("rooms", "at least one room is required"));
        }

        for (index, room) in self.rooms.iter().enumerate() {
            if room.num_adults == 0 {
                return Err(invalid(
                    format!("rooms[{}].num_adults", index),
                    "at least one adult is required",
                ));
            }
            if !room.children_ages.is_empty()
                && room.children_ages.len() != room.num_children as usize
            {
                return Err(invalid(
                    format!("rooms[{}].children_ages", index),
                    format!(
                        "lists {} ages for {} children",
                        room.children_ages.len(),
                        room.num_children
                    ),
                ));
            }
        }

        for (index, request) in self.supplements.iter().enumerate() {
            if request.quantity == 0 {
                return Err(invalid(
                    format!("supplements[{}].quantity", index),
                    "must be at least 1",
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> EngineError {
    EngineError::InvalidCriteria {
        field: field.into(),
        message: message.into(),
    }
}
