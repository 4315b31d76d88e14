//! Discount composition.
//!
//! This module folds the offers active on a night into a single price
//! multiplier, honouring each offer's [`DiscountMode`].

use rust_decimal::Decimal;

use crate::models::{AuditStep, DiscountMode, Offer};

/// The result of composing offers, including the multiplier and audit step.
#[derive(Debug, Clone)]
pub struct DiscountComposition {
    /// The combined multiplier to apply to a price, never negative.
    pub multiplier: Decimal,
    /// Product of the sequential offers' factors.
    pub sequential_factor: Decimal,
    /// The single factor of the summed additive offers.
    pub additive_factor: Decimal,
    /// Ids of the offers that contributed, in request order.
    pub applied_offer_ids: Vec<String>,
    /// The audit step recording this composition.
    pub audit_step: AuditStep,
}

/// Combines offers into one multiplier.
///
/// Sequential offers are applied one after another in request order:
/// `(1 - a) * (1 - b)`. Additive offers are summed and applied once:
/// `1 - (a + b)`. When both groups are present the sequential chain comes
/// first and the additive factor is applied to its result. Each sequential
/// factor and the final multiplier are clamped at zero.
///
/// With no offers the multiplier is exactly `1`.
///
/// # Examples
///
/// ```
/// use hotel_pricing_engine::calculation::compose_discount;
/// use hotel_pricing_engine::models::{DiscountMode, Offer, OfferEffect};
/// use rust_decimal::Decimal;
///
/// let offer = |id: &str, pct: i64, mode| Offer {
///     id: id.to_string(),
///     name: id.to_string(),
///     effect: OfferEffect::Percentage { value: Decimal::from(pct) },
///     discount_mode: mode,
///     apply_to_room_only: false,
///     apply_to_meal_supplements: false,
///     min_stay: 0,
///     periods: vec![],
/// };
///
/// let a = offer("a", 10, DiscountMode::Sequential);
/// let b = offer("b", 5, DiscountMode::Sequential);
/// let composition = compose_discount(&[&a, &b], 1);
/// assert_eq!(composition.multiplier * Decimal::from(200), Decimal::from(171));
/// ```
pub fn compose_discount(offers: &[&Offer], step_number: u32) -> DiscountComposition {
    let (sequential, additive): (Vec<&Offer>, Vec<&Offer>) = offers
        .iter()
        .copied()
        .partition(|o| o.discount_mode == DiscountMode::Sequential);

    let sequential_factor = sequential
        .iter()
        .fold(Decimal::ONE, |factor, o| {
            factor * (Decimal::ONE - o.effect.reduction_rate()).max(Decimal::ZERO)
        });

    let additive_rate: Decimal = additive.iter().map(|o| o.effect.reduction_rate()).sum();
    let additive_factor = Decimal::ONE - additive_rate;

    let multiplier = (sequential_factor * additive_factor).max(Decimal::ZERO);
    let clamped = multiplier != sequential_factor * additive_factor;

    let applied_offer_ids: Vec<String> = offers.iter().map(|o| o.id.clone()).collect();
    let sequential_ids: Vec<&str> = sequential.iter().map(|o| o.id.as_str()).collect();
    let additive_ids: Vec<&str> = additive.iter().map(|o| o.id.as_str()).collect();

    let reasoning = if offers.is_empty() {
        "No offers active - multiplier 1".to_string()
    } else if clamped {
        format!(
            "Sequential {} x additive {} is below zero - clamped to 0",
            sequential_factor.normalize(),
            additive_factor.normalize()
        )
    } else {
        format!(
            "Sequential {} x additive {} = {}",
            sequential_factor.normalize(),
            additive_factor.normalize(),
            multiplier.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "discount_composition".to_string(),
        rule_name: "Discount Composition".to_string(),
        input: serde_json::json!({
            "sequential_offers": sequential_ids,
            "additive_offers": additive_ids
        }),
        output: serde_json::json!({
            "sequential_factor": sequential_factor.normalize().to_string(),
            "additive_factor": additive_factor.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string(),
            "clamped": clamped
        }),
        reasoning,
    };

    DiscountComposition {
        multiplier,
        sequential_factor,
        additive_factor,
        applied_offer_ids,
        audit_step,
    }
}
