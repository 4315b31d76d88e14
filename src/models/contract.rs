//! Contract models: periods, room prices, occupancy rates and meal plan surcharges.
//!
//! A [`Contract`] is a hotel's negotiated rate sheet for one market, split into
//! non-overlapping [`ContractPeriod`]s. Every table that is looked up by
//! occupancy is keyed by an explicit [`OccupancyKey`] rather than a string.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The exact `(adults, children)` pair filling a room.
///
/// # Example
///
/// ```
/// use hotel_pricing_engine::models::OccupancyKey;
///
/// let key = OccupancyKey::new(2, 1);
/// assert_eq!(key.to_string(), "2-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccupancyKey {
    /// Number of adults.
    pub num_adults: u32,
    /// Number of children.
    pub num_children: u32,
}

impl OccupancyKey {
    /// Creates a new occupancy key.
    pub fn new(num_adults: u32, num_children: u32) -> Self {
        Self {
            num_adults,
            num_children,
        }
    }
}

impl fmt::Display for OccupancyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.num_adults, self.num_children)
    }
}

/// An age band defined by a hotel (e.g. "adult" 18-99, "child" 2-11).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategory {
    /// Unique identifier of the category.
    pub id: String,
    /// The hotel this category belongs to.
    pub hotel_id: String,
    /// Display name.
    pub name: String,
    /// Youngest age in the band (inclusive).
    pub min_age: u8,
    /// Oldest age in the band (inclusive).
    pub max_age: u8,
}

impl AgeCategory {
    /// Returns true if the given age falls inside this band.
    pub fn contains_age(&self, age: u8) -> bool {
        age >= self.min_age && age <= self.max_age
    }
}

/// One guest's share of an occupancy rate.
///
/// Rows are keyed by `(age_category_id, sequence)`: two adults are
/// `("adult", 1)` and `("adult", 2)`, never two rows under a bare `"adult"` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeCategoryRate {
    /// The age category of the guest.
    pub age_category_id: String,
    /// 1-based position of the guest within its category.
    pub sequence: u32,
    /// The nightly rate for this guest.
    pub rate: Decimal,
}

impl AgeCategoryRate {
    /// Returns the composite key of this row.
    pub fn key(&self) -> (&str, u32) {
        (self.age_category_id.as_str(), self.sequence)
    }
}

/// A priced row for one exact occupancy under a per-occupancy room price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyRate {
    /// Number of adults this row prices.
    pub num_adults: u32,
    /// Number of children this row prices.
    pub num_children: u32,
    /// Per-guest breakdown of the rate.
    #[serde(default)]
    pub rates_per_age: Vec<AgeCategoryRate>,
    /// The nightly room price for this occupancy.
    pub total_rate: Decimal,
}

impl OccupancyRate {
    /// Returns the occupancy this row prices.
    pub fn key(&self) -> OccupancyKey {
        OccupancyKey::new(self.num_adults, self.num_children)
    }

    /// Sums the per-guest breakdown, or `None` when no breakdown is present.
    pub fn components_total(&self) -> Option<Decimal> {
        if self.rates_per_age.is_empty() {
            return None;
        }
        Some(self.rates_per_age.iter().map(|r| r.rate).sum())
    }
}

/// How a room type is priced in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pricing_mode", rename_all = "snake_case")]
pub enum RoomRate {
    /// A flat nightly price regardless of who occupies the room.
    PerRoom {
        /// The flat nightly price.
        price_per_night: Decimal,
    },
    /// A nightly price looked up by exact occupancy.
    PerOccupancy {
        /// One row per priced occupancy.
        occupancy_rates: Vec<OccupancyRate>,
    },
}

impl RoomRate {
    /// Returns the pricing mode name used in audit output.
    pub fn mode_name(&self) -> &'static str {
        match self {
            RoomRate::PerRoom { .. } => "per_room",
            RoomRate::PerOccupancy { .. } => "per_occupancy",
        }
    }
}

/// The price of one room type within a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPrice {
    /// The room type being priced.
    pub room_type_id: String,
    /// The rate definition.
    pub rate: RoomRate,
}

/// One nightly surcharge row of a meal plan table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanSurcharge {
    /// Number of adults this row prices.
    pub num_adults: u32,
    /// Number of children this row prices.
    pub num_children: u32,
    /// The nightly surcharge per room.
    pub price: Decimal,
}

impl MealPlanSurcharge {
    /// Returns the occupancy this row prices.
    pub fn key(&self) -> OccupancyKey {
        OccupancyKey::new(self.num_adults, self.num_children)
    }
}

/// Surcharges for upgrading from a period's base meal plan to another plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlanSupplement {
    /// The meal plan this table prices (e.g. "HB").
    pub meal_plan_id: String,
    /// Surcharge rows keyed by occupancy.
    pub surcharges: Vec<MealPlanSurcharge>,
}

impl MealPlanSupplement {
    /// Returns the nightly surcharge for an exact occupancy.
    pub fn surcharge_for(&self, key: OccupancyKey) -> Option<Decimal> {
        self.surcharges
            .iter()
            .find(|s| s.key() == key)
            .map(|s| s.price)
    }
}

/// A date range of a contract with its own rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractPeriod {
    /// Unique identifier of the period within its contract.
    pub id: String,
    /// First night covered (inclusive).
    pub start_date: NaiveDate,
    /// Last night covered (inclusive).
    pub end_date: NaiveDate,
    /// The meal plan included in the room rates.
    pub base_meal_plan_id: String,
    /// Minimum number of nights a stay touching this period must have.
    #[serde(default)]
    pub min_stay: u32,
    /// Room prices by room type.
    pub room_prices: Vec<RoomPrice>,
    /// Surcharges for meal plans other than the base plan.
    #[serde(default)]
    pub meal_plan_supplements: Vec<MealPlanSupplement>,
    /// Nights closed to sale.
    #[serde(default)]
    pub stop_sales: Vec<NaiveDate>,
}

impl ContractPeriod {
    /// Returns true if the night falls inside this period (inclusive on both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the night is a stop-sale date.
    pub fn is_stop_sale(&self, date: NaiveDate) -> bool {
        self.stop_sales.contains(&date)
    }

    /// Returns true if the two periods share at least one night.
    pub fn overlaps(&self, other: &ContractPeriod) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Finds the price of a room type.
    pub fn room_price(&self, room_type_id: &str) -> Option<&RoomPrice> {
        self.room_prices
            .iter()
            .find(|rp| rp.room_type_id == room_type_id)
    }

    /// Finds the surcharge table of a meal plan.
    pub fn meal_plan_supplement(&self, meal_plan_id: &str) -> Option<&MealPlanSupplement> {
        self.meal_plan_supplements
            .iter()
            .find(|m| m.meal_plan_id == meal_plan_id)
    }
}

/// A hotel's negotiated rates for one market.
///
/// # Example
///
/// ```
/// use hotel_pricing_engine::models::{Contract, ContractPeriod};
/// use chrono::NaiveDate;
///
/// let period = |id: &str, start: (i32, u32, u32), end: (i32, u32, u32)| ContractPeriod {
///     id: id.to_string(),
///     start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
///     base_meal_plan_id: "BB".to_string(),
///     min_stay: 0,
///     room_prices: vec![],
///     meal_plan_supplements: vec![],
///     stop_sales: vec![],
/// };
///
/// let contract = Contract::new(
///     "c1",
///     "riviera",
///     "uk",
///     "EUR",
///     vec![period("summer", (2026, 6, 1), (2026, 8, 31)), period("spring", (2026, 3, 1), (2026, 5, 31))],
/// );
///
/// assert_eq!(contract.periods[0].id, "spring");
/// let night = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
/// assert_eq!(contract.period_for(night).unwrap().id, "summer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier of the contract.
    pub id: String,
    /// The hotel the contract prices.
    pub hotel_id: String,
    /// The source market the contract applies to.
    pub market_id: String,
    /// ISO currency code of every amount in the contract.
    pub currency: String,
    /// Periods sorted by start date.
    pub periods: Vec<ContractPeriod>,
}

impl Contract {
    /// Creates a contract, sorting its periods by start date.
    pub fn new(
        id: impl Into<String>,
        hotel_id: impl Into<String>,
        market_id: impl Into<String>,
        currency: impl Into<String>,
        periods: Vec<ContractPeriod>,
    ) -> Self {
        let mut contract = Self {
            id: id.into(),
            hotel_id: hotel_id.into(),
            market_id: market_id.into(),
            currency: currency.into(),
            periods,
        };
        contract.sort_periods();
        contract
    }

    /// Sorts periods by start date.
    pub fn sort_periods(&mut self) {
        self.periods.sort_by(|a, b| a.start_date.cmp(&b.start_date));
    }

    /// Finds the period covering a night.
    pub fn period_for(&self, date: NaiveDate) -> Option<&ContractPeriod> {
        self.periods.iter().find(|p| p.contains_date(date))
    }
}
