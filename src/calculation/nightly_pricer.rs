//! Night-by-night room pricing.
//!
//! This module walks the nights of a stay, locates the contract period of each
//! night, resolves every room's base price, applies the night's offers, and
//! records the per night, per room breakdown.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::discount_composer::compose_discount;
use super::money::round_currency;
use super::offer_filter::{OfferContext, active_offers, is_offer_active};
use super::rate_resolver::resolve_base_price;
use super::supplement_pricer::price_meal_plan_night;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditWarning, Contract, ContractPeriod, NightlyBreakdownEntry, Offer,
    PricingCriteria,
};

/// The result of pricing every night of a stay.
#[derive(Debug, Clone)]
pub struct NightlyPricing {
    /// Per night, per room ledger in chronological then room order.
    pub breakdown: Vec<NightlyBreakdownEntry>,
    /// The audit steps recorded while pricing, numbered from the first step given.
    pub audit_steps: Vec<AuditStep>,
    /// Data warnings raised while pricing.
    pub warnings: Vec<AuditWarning>,
}

/// Finds the contract period covering a night.
///
/// # Errors
///
/// - `PeriodNotFound` when no period covers the night
/// - `StopSale` when the night is closed to sale
/// - `MinimumStayNotMet` when the stay is shorter than the period's minimum
pub fn locate_period(
    contract: &Contract,
    date: NaiveDate,
    total_nights: u32,
) -> EngineResult<&ContractPeriod> {
    let period = contract
        .period_for(date)
        .ok_or(EngineError::PeriodNotFound { date })?;

    if period.is_stop_sale(date) {
        return Err(EngineError::StopSale {
            date,
            period_id: period.id.clone(),
        });
    }

    if total_nights < period.min_stay {
        return Err(EngineError::MinimumStayNotMet {
            period_id: period.id.clone(),
            min_stay: period.min_stay,
            nights: total_nights,
        });
    }

    Ok(period)
}

/// Prices every night of the stay for every requested room.
///
/// Every night in `[check_in, check_out)` is first matched to its covering
/// period, so an uncovered or closed night fails before any pricing work. Then
/// each room's base price is resolved and the room-context offers active that
/// night are composed into a multiplier. The discounted price is rounded per
/// night per room. Rooms upgrading their meal plan also get the night's
/// surcharge; when an offer that applies to meal supplements is active for the
/// stay, the surcharge takes the same multiplier as the room that night.
///
/// `offers` must already be resolved, in request order.
///
/// # Errors
///
/// Any failure on any night aborts the whole stay: see [`locate_period`],
/// `RoomTypeNotPriced`, and the errors of the rate resolver and meal plan
/// pricer.
pub fn price_nights(
    contract: &Contract,
    criteria: &PricingCriteria,
    offers: &[&Offer],
    first_step_number: u32,
) -> EngineResult<NightlyPricing> {
    let total_nights = criteria.total_nights;
    let covered_nights = criteria
        .nights()
        .map(|date| locate_period(contract, date, total_nights).map(|period| (date, period)))
        .collect::<EngineResult<Vec<_>>>()?;

    let meal_offers: Vec<&Offer> = offers
        .iter()
        .copied()
        .filter(|o| {
            OfferContext::MealPlan.accepts(o)
                && covered_nights
                    .iter()
                    .any(|(date, _)| is_offer_active(o, *date, total_nights))
        })
        .collect();
    let discount_meals = !meal_offers.is_empty();

    let mut step_number = first_step_number;
    let mut breakdown = Vec::new();
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();

    for (date, period) in covered_nights {
        let room_offers = active_offers(offers, date, total_nights, OfferContext::Room);
        let room_discount = compose_discount(&room_offers, step_number);
        audit_steps.push(room_discount.audit_step);
        step_number += 1;

        let meal_multiplier = if discount_meals {
            room_discount.multiplier
        } else {
            Decimal::ONE
        };

        debug!(
            date = %date,
            period_id = %period.id,
            offers = ?room_discount.applied_offer_ids,
            multiplier = %room_discount.multiplier,
            discount_meals,
            "Pricing night"
        );

        for (room_index, room) in criteria.rooms.iter().enumerate() {
            let room_price = period.room_price(&room.room_type_id).ok_or_else(|| {
                EngineError::RoomTypeNotPriced {
                    room_type_id: room.room_type_id.clone(),
                    period_id: period.id.clone(),
                }
            })?;

            let resolution = resolve_base_price(room_price, room.occupancy(), step_number)?;
            audit_steps.push(resolution.audit_step);
            step_number += 1;
            warnings.extend(resolution.warning);

            let base_room_price = resolution.rate;
            let final_price_this_night = round_currency(base_room_price * room_discount.multiplier);

            let meal = price_meal_plan_night(period, room, meal_multiplier, step_number)?;
            if let Some(mut step) = meal.audit_step {
                step.input["meal_offers"] =
                    serde_json::json!(meal_offers.iter().map(|o| o.id.as_str()).collect::<Vec<_>>());
                audit_steps.push(step);
                step_number += 1;
            }

            breakdown.push(NightlyBreakdownEntry {
                date,
                room_index,
                room_type_id: room.room_type_id.clone(),
                period_id: period.id.clone(),
                base_room_price,
                final_price_this_night,
                multiplier: room_discount.multiplier,
                meal_supplement_base: meal.base,
                meal_supplement_final: meal.final_amount,
            });
        }
    }

    Ok(NightlyPricing {
        breakdown,
        audit_steps,
        warnings,
    })
}
