//! Calculation logic for the Hotel Pricing Engine.
//!
//! This module contains the pricing functions for a stay: base rate
//! resolution per occupancy, offer eligibility per night, discount
//! composition, meal plan and supplement pricing, nightly pricing, invoice
//! totals, and the [`calculate_price`] orchestration tying them together.

mod aggregator;
mod discount_composer;
mod engine;
mod money;
mod nightly_pricer;
mod offer_filter;
mod rate_resolver;
mod supplement_pricer;

pub use aggregator::{PricingTotals, aggregate_totals};
pub use discount_composer::{DiscountComposition, compose_discount};
pub use engine::calculate_price;
pub use money::{CURRENCY_PRECISION, round_currency};
pub use nightly_pricer::{NightlyPricing, locate_period, price_nights};
pub use offer_filter::{OfferContext, active_offers, is_offer_active, stay_active_offers};
pub use rate_resolver::{OCCUPANCY_TOTAL_MISMATCH, RateResolution, resolve_base_price};
pub use supplement_pricer::{
    MealPlanCharge, SupplementPricing, calculate_supplement_price, price_meal_plan_night,
    price_supplement,
};
