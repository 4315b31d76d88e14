//! Pricing result models for the Hotel Pricing Engine.
//!
//! This module contains the [`PricingResult`] type and its associated structures
//! that capture all outputs of a price calculation: the nightly breakdown,
//! supplement lines, totals, and the audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SupplementUnit;

/// One night of one room in the invoice ledger.
///
/// `base_room_price - final_price_this_night` is the room discount of the night;
/// summed over the breakdown it equals the result's `discount_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyBreakdownEntry {
    /// The night being priced.
    pub date: NaiveDate,
    /// Position of the room in the request.
    pub room_index: usize,
    /// The room type priced.
    pub room_type_id: String,
    /// The contract period covering the night.
    pub period_id: String,
    /// Undiscounted room price.
    pub base_room_price: Decimal,
    /// Room price after offers, rounded to currency precision.
    pub final_price_this_night: Decimal,
    /// The combined offer multiplier applied to the room price.
    pub multiplier: Decimal,
    /// Undiscounted meal plan surcharge, zero when the base plan is kept.
    pub meal_supplement_base: Decimal,
    /// Meal plan surcharge after offers, rounded to currency precision.
    pub meal_supplement_final: Decimal,
}

/// A priced ancillary supplement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplementLine {
    /// The supplement priced.
    pub supplement_id: String,
    /// The unit the supplement is quoted in.
    pub unit: SupplementUnit,
    /// Number of units requested.
    pub quantity: u32,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Charge before any discount.
    pub raw_amount: Decimal,
    /// Whether the stay-level offer multiplier was applied.
    pub discounted: bool,
    /// Final charge, rounded to currency precision.
    pub amount: Decimal,
}

/// A single step in the audit trace recording a pricing decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag suspicious input data that did not prevent pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use hotel_pricing_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Returns the number the next recorded step should carry.
    pub fn next_step_number(&self) -> u32 {
        self.steps.len() as u32 + 1
    }
}

/// The complete, reconciled invoice for a stay.
///
/// A result holds no clock or random data, so the same criteria and catalog
/// always produce an equal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// The hotel priced.
    pub hotel_id: String,
    /// The market priced.
    pub market_id: String,
    /// The contract used.
    pub contract_id: String,
    /// Currency of every amount.
    pub currency: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Number of nights priced.
    pub total_nights: u32,
    /// Discounted room nights plus discounted meal plan surcharges.
    pub rooms_subtotal: Decimal,
    /// Room-level reduction only.
    pub discount_amount: Decimal,
    /// Sum of the supplement lines.
    pub supplements_total: Decimal,
    /// `rooms_subtotal + supplements_total`.
    pub total_amount: Decimal,
    /// Per night, per room ledger in chronological then room order.
    pub breakdown: Vec<NightlyBreakdownEntry>,
    /// Priced ancillary supplements in request order.
    pub supplements: Vec<SupplementLine>,
    /// Complete audit trace of pricing decisions.
    pub audit_trace: AuditTrace,
}
