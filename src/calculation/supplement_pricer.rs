//! Meal plan surcharge and ancillary supplement pricing.
//!
//! Meal plan surcharges are priced per night per room and folded into the
//! rooms subtotal. Ancillary supplements are priced once per stay with
//! unit-specific arithmetic and an optional stay-level discount.

use rust_decimal::Decimal;

use super::money::round_currency;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, ContractPeriod, RoomRequest, Supplement, SupplementLine, SupplementUnit,
};

/// Computes the undiscounted charge of a supplement.
///
/// - `per_person_per_stay`: `price * quantity` (quantity counts persons)
/// - `per_room_per_night`: `price * quantity * nights` (quantity counts rooms)
/// - `per_room_per_stay`: `price * quantity`
///
/// # Examples
///
/// ```
/// use hotel_pricing_engine::calculation::calculate_supplement_price;
/// use hotel_pricing_engine::models::{Supplement, SupplementUnit};
/// use rust_decimal::Decimal;
///
/// let parking = Supplement {
///     id: "parking".to_string(),
///     name: "Parking".to_string(),
///     price: Decimal::from(12),
///     unit: SupplementUnit::PerRoomPerNight,
///     can_receive_discount: false,
/// };
///
/// assert_eq!(calculate_supplement_price(&parking, 2, 3), Decimal::from(72));
/// ```
pub fn calculate_supplement_price(supplement: &Supplement, quantity: u32, nights: u32) -> Decimal {
    let quantity = Decimal::from(quantity);
    match supplement.unit {
        SupplementUnit::PerPersonPerStay | SupplementUnit::PerRoomPerStay => {
            supplement.price * quantity
        }
        SupplementUnit::PerRoomPerNight => supplement.price * quantity * Decimal::from(nights),
    }
}

/// The result of pricing a supplement, including the invoice line and audit step.
#[derive(Debug, Clone)]
pub struct SupplementPricing {
    /// The priced invoice line.
    pub line: SupplementLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices one requested supplement for the stay.
///
/// `stay_multiplier` is the composed multiplier of the offers that apply to
/// supplements for this stay; it is only used when the supplement can receive
/// a discount.
pub fn price_supplement(
    supplement: &Supplement,
    quantity: u32,
    nights: u32,
    stay_multiplier: Decimal,
    step_number: u32,
) -> SupplementPricing {
    let raw_amount = calculate_supplement_price(supplement, quantity, nights);
    let discounted = supplement.can_receive_discount && stay_multiplier != Decimal::ONE;

    let amount = if supplement.can_receive_discount {
        round_currency(raw_amount * stay_multiplier)
    } else {
        round_currency(raw_amount)
    };

    let arithmetic = match supplement.unit {
        SupplementUnit::PerRoomPerNight => format!(
            "{} x {} x {} nights = {}",
            supplement.price.normalize(),
            quantity,
            nights,
            raw_amount.normalize()
        ),
        _ => format!(
            "{} x {} = {}",
            supplement.price.normalize(),
            quantity,
            raw_amount.normalize()
        ),
    };

    let reasoning = if discounted {
        format!(
            "{}, x {} stay discount = {}",
            arithmetic,
            stay_multiplier.normalize(),
            amount
        )
    } else if supplement.can_receive_discount {
        format!("{} - no stay offer applies", arithmetic)
    } else {
        format!("{} - supplement cannot receive discounts", arithmetic)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "supplement_pricing".to_string(),
        rule_name: "Supplement Pricing".to_string(),
        input: serde_json::json!({
            "supplement_id": supplement.id,
            "unit": supplement.unit.as_str(),
            "price": supplement.price.to_string(),
            "quantity": quantity,
            "nights": nights,
            "can_receive_discount": supplement.can_receive_discount
        }),
        output: serde_json::json!({
            "raw_amount": raw_amount.to_string(),
            "multiplier": stay_multiplier.normalize().to_string(),
            "discounted": discounted,
            "amount": amount.to_string()
        }),
        reasoning,
    };

    SupplementPricing {
        line: SupplementLine {
            supplement_id: supplement.id.clone(),
            unit: supplement.unit,
            quantity,
            unit_price: supplement.price,
            raw_amount,
            discounted,
            amount,
        },
        audit_step,
    }
}

/// The meal plan surcharge of one room on one night.
#[derive(Debug, Clone)]
pub struct MealPlanCharge {
    /// Undiscounted nightly surcharge.
    pub base: Decimal,
    /// Surcharge after offers, rounded to currency precision.
    pub final_amount: Decimal,
    /// The audit step recording the surcharge, absent when the base plan is kept.
    pub audit_step: Option<AuditStep>,
}

impl MealPlanCharge {
    fn none() -> Self {
        Self {
            base: Decimal::ZERO,
            final_amount: Decimal::ZERO,
            audit_step: None,
        }
    }
}

/// Prices the meal plan surcharge of a room for one night.
///
/// No surcharge applies when the room keeps the period's base meal plan.
/// Otherwise the period must list the requested plan and an exact row for the
/// room's occupancy. `meal_multiplier` is the composed multiplier of the offers
/// that apply to meal plan surcharges on this night.
///
/// # Errors
///
/// - `MealPlanNotAvailable` when the period has no table for the plan
/// - `UnresolvedMealPlanOccupancy` when the table has no row for the occupancy
pub fn price_meal_plan_night(
    period: &ContractPeriod,
    room: &RoomRequest,
    meal_multiplier: Decimal,
    step_number: u32,
) -> EngineResult<MealPlanCharge> {
    let meal_plan_id = match &room.meal_plan_id {
        Some(id) if *id != period.base_meal_plan_id => id,
        _ => return Ok(MealPlanCharge::none()),
    };

    let table = period.meal_plan_supplement(meal_plan_id).ok_or_else(|| {
        EngineError::MealPlanNotAvailable {
            meal_plan_id: meal_plan_id.clone(),
            period_id: period.id.clone(),
        }
    })?;

    let occupancy = room.occupancy();
    let base = table
        .surcharge_for(occupancy)
        .ok_or_else(|| EngineError::UnresolvedMealPlanOccupancy {
            meal_plan_id: meal_plan_id.clone(),
            num_adults: occupancy.num_adults,
            num_children: occupancy.num_children,
        })?;

    let final_amount = round_currency(base * meal_multiplier);

    let audit_step = AuditStep {
        step_number,
        rule_id: "meal_plan_surcharge".to_string(),
        rule_name: "Meal Plan Surcharge".to_string(),
        input: serde_json::json!({
            "period_id": period.id,
            "base_meal_plan_id": period.base_meal_plan_id,
            "meal_plan_id": meal_plan_id,
            "occupancy": occupancy.to_string()
        }),
        output: serde_json::json!({
            "surcharge": base.to_string(),
            "multiplier": meal_multiplier.normalize().to_string(),
            "amount": final_amount.to_string()
        }),
        reasoning: format!(
            "{} upgrade from {} for {}: {} x {} = {}",
            meal_plan_id,
            period.base_meal_plan_id,
            occupancy,
            base.normalize(),
            meal_multiplier.normalize(),
            final_amount
        ),
    };

    Ok(MealPlanCharge {
        base,
        final_amount,
        audit_step: Some(audit_step),
    })
}
