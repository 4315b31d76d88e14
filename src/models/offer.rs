//! Promotional offer models.
//!
//! An [`Offer`] reduces the price of the nights it is valid on. How several
//! offers combine on one night is decided by their [`DiscountMode`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an offer's reduction combines with other offers active on the same night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    /// Applied one after another: `price * (1 - a) * (1 - b)`.
    Sequential,
    /// Summed then applied once: `price * (1 - (a + b))`.
    Additive,
}

/// What an offer does to a price.
///
/// # Example
///
/// ```
/// use hotel_pricing_engine::models::OfferEffect;
/// use rust_decimal::Decimal;
///
/// let effect = OfferEffect::Percentage { value: Decimal::from(10) };
/// assert_eq!(effect.reduction_rate(), Decimal::new(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferEffect {
    /// A percentage off the price (e.g. `10` for 10%).
    Percentage {
        /// The percentage, on a 0-100 scale.
        value: Decimal,
    },
}

impl OfferEffect {
    /// Returns the fraction of the price this effect removes (0.10 for 10%).
    pub fn reduction_rate(&self) -> Decimal {
        match self {
            OfferEffect::Percentage { value } => *value / Decimal::ONE_HUNDRED,
        }
    }
}

/// A validity window of an offer, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferPeriod {
    /// First night the offer is valid.
    pub start_date: NaiveDate,
    /// Last night the offer is valid.
    pub end_date: NaiveDate,
}

impl OfferPeriod {
    /// Returns true if the night falls inside this window.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

/// A promotional offer that can be requested with a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Unique identifier of the offer.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The reduction the offer applies.
    pub effect: OfferEffect,
    /// How this offer combines with others on the same night.
    pub discount_mode: DiscountMode,
    /// When true the offer discounts room nights only, never meals or supplements.
    #[serde(default)]
    pub apply_to_room_only: bool,
    /// When true the offer also discounts meal plan surcharges.
    #[serde(default)]
    pub apply_to_meal_supplements: bool,
    /// Minimum number of nights the whole stay must have.
    #[serde(default)]
    pub min_stay: u32,
    /// Validity windows.
    pub periods: Vec<OfferPeriod>,
}

impl Offer {
    /// Returns true if any validity window contains the night.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.periods.iter().any(|p| p.contains_date(date))
    }
}
