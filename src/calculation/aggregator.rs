//! Invoice totals.

use rust_decimal::Decimal;

use crate::models::{AuditStep, NightlyBreakdownEntry, SupplementLine};

/// Aggregated invoice totals, including the audit step.
#[derive(Debug, Clone)]
pub struct PricingTotals {
    /// Discounted room nights plus discounted meal plan surcharges.
    pub rooms_subtotal: Decimal,
    /// Room-level reduction: `Σ base_room_price - Σ final_price_this_night`.
    pub discount_amount: Decimal,
    /// Sum of the supplement lines.
    pub supplements_total: Decimal,
    /// `rooms_subtotal + supplements_total`.
    pub total_amount: Decimal,
    /// The audit step recording the totals.
    pub audit_step: AuditStep,
}

/// Folds the nightly breakdown and supplement lines into invoice totals.
///
/// The discount is the sum of each entry's own reduction, so it reconciles
/// exactly with the breakdown. Meal plan and supplement discounts are already
/// inside their amounts and are not part of `discount_amount`.
pub fn aggregate_totals(
    breakdown: &[NightlyBreakdownEntry],
    supplements: &[SupplementLine],
    step_number: u32,
) -> PricingTotals {
    let room_nights_total: Decimal = breakdown.iter().map(|e| e.final_price_this_night).sum();
    let meal_total: Decimal = breakdown.iter().map(|e| e.meal_supplement_final).sum();
    let discount_amount: Decimal = breakdown
        .iter()
        .map(|e| e.base_room_price - e.final_price_this_night)
        .sum();
    let supplements_total: Decimal = supplements.iter().map(|s| s.amount).sum();

    let rooms_subtotal = room_nights_total + meal_total;
    let total_amount = rooms_subtotal + supplements_total;

    let audit_step = AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Invoice Totals".to_string(),
        input: serde_json::json!({
            "breakdown_entries": breakdown.len(),
            "supplement_lines": supplements.len()
        }),
        output: serde_json::json!({
            "room_nights_total": room_nights_total.to_string(),
            "meal_supplements_total": meal_total.to_string(),
            "rooms_subtotal": rooms_subtotal.to_string(),
            "discount_amount": discount_amount.to_string(),
            "supplements_total": supplements_total.to_string(),
            "total_amount": total_amount.to_string()
        }),
        reasoning: format!(
            "{} rooms + {} meals + {} supplements = {}",
            room_nights_total, meal_total, supplements_total, total_amount
        ),
    };

    PricingTotals {
        rooms_subtotal,
        discount_amount,
        supplements_total,
        total_amount,
        audit_step,
    }
}
