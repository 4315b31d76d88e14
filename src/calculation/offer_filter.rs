//! Offer eligibility.
//!
//! Decides which requested offers apply to a night, or to the stay as a whole,
//! for a given pricing context.

use chrono::NaiveDate;

use crate::models::Offer;

/// What is being priced when offers are filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferContext {
    /// A room night.
    Room,
    /// A meal plan surcharge.
    MealPlan,
    /// An ancillary supplement.
    Supplement,
}

impl OfferContext {
    /// Returns true if the offer's scope flags allow it in this context.
    ///
    /// Room nights accept every offer. A meal plan surcharge is discounted only
    /// when an offer with `apply_to_meal_supplements` that is not room-only is
    /// active for the stay. Supplements reject room-only offers.
    pub fn accepts(&self, offer: &Offer) -> bool {
        match self {
            OfferContext::Room => true,
            OfferContext::MealPlan => offer.apply_to_meal_supplements && !offer.apply_to_room_only,
            OfferContext::Supplement => !offer.apply_to_room_only,
        }
    }
}

/// Returns true if an offer is active on a night.
///
/// An offer is active when one of its periods contains the night and the whole
/// stay reaches its minimum stay. The minimum stay is judged against
/// `total_nights`, never against the nights remaining, so a short stay misses a
/// long-stay offer on every night.
///
/// # Examples
///
/// ```
/// use hotel_pricing_engine::calculation::is_offer_active;
/// use hotel_pricing_engine::models::{DiscountMode, Offer, OfferEffect, OfferPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let offer = Offer {
///     id: "long_stay".to_string(),
///     name: "Long Stay".to_string(),
///     effect: OfferEffect::Percentage { value: Decimal::from(15) },
///     discount_mode: DiscountMode::Sequential,
///     apply_to_room_only: false,
///     apply_to_meal_supplements: false,
///     min_stay: 7,
///     periods: vec![OfferPeriod {
///         start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
///         end_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
///     }],
/// };
///
/// let night = NaiveDate::from_ymd_opt(2026, 7, 10).unwrap();
/// assert!(is_offer_active(&offer, night, 7));
/// assert!(!is_offer_active(&offer, night, 3));
/// ```
pub fn is_offer_active(offer: &Offer, date: NaiveDate, total_nights: u32) -> bool {
    total_nights >= offer.min_stay && offer.is_valid_on(date)
}

/// Returns the offers active on a night for a context, in request order.
pub fn active_offers<'a>(
    offers: &[&'a Offer],
    date: NaiveDate,
    total_nights: u32,
    context: OfferContext,
) -> Vec<&'a Offer> {
    offers
        .iter()
        .copied()
        .filter(|o| context.accepts(o) && is_offer_active(o, date, total_nights))
        .collect()
}

/// Returns the offers active on at least one night of the stay, in request order.
///
/// Used for charges priced once per stay rather than per night.
pub fn stay_active_offers<'a>(
    offers: &[&'a Offer],
    nights: &[NaiveDate],
    context: OfferContext,
) -> Vec<&'a Offer> {
    let total_nights = nights.len() as u32;
    offers
        .iter()
        .copied()
        .filter(|o| {
            context.accepts(o)
                && nights
                    .iter()
                    .any(|night| is_offer_active(o, *night, total_nights))
        })
        .collect()
}
