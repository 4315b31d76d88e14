//! Stay pricing orchestration.
//!
//! [`calculate_price`] resolves the contract, offers and supplements a
//! request names, prices every night, prices the supplements, and folds the
//! result into a reconciled [`PricingResult`] with its audit trace.

use tracing::{debug, info};

use super::aggregator::aggregate_totals;
use super::discount_composer::compose_discount;
use super::nightly_pricer::price_nights;
use super::offer_filter::{OfferContext, stay_active_offers};
use super::supplement_pricer::price_supplement;
use crate::config::PricingCatalog;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, Offer, PricingCriteria, PricingResult, Supplement};

/// Calculates the full price of a stay.
///
/// The calculation is pure: it reads the catalog, never mutates it, and holds
/// no clock or random state, so equal inputs give equal results.
///
/// # Errors
///
/// - `InvalidCriteria` when the request is inconsistent
/// - `ContractNotFound` when the hotel has no contract for the market
/// - `UnknownOffer` or `UnknownSupplement` for ids the catalog does not hold
/// - any error raised while pricing a night, which aborts the whole stay
///
/// # Examples
///
/// ```no_run
/// use hotel_pricing_engine::calculation::calculate_price;
/// use hotel_pricing_engine::config::CatalogLoader;
/// use hotel_pricing_engine::models::{PricingCriteria, RoomRequest};
/// use chrono::NaiveDate;
///
/// let loader = CatalogLoader::load("./config/riviera_resort")?;
/// let criteria = PricingCriteria {
///     hotel_id: "riviera_resort".to_string(),
///     market_id: "uk".to_string(),
///     check_in: NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
///     check_out: NaiveDate::from_ymd_opt(2026, 7, 13).unwrap(),
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
/// let result = calculate_price(&criteria, loader.catalog())?;
/// println!("Total: {} {}", result.total_amount, result.currency);
/// # Ok::<(), hotel_pricing_engine::error::EngineError>(())
/// ```
pub fn calculate_price<C>(criteria: &PricingCriteria, catalog: &C) -> EngineResult<PricingResult>
where
    C: PricingCatalog + ?Sized,
{
    criteria.validate()?;

    let contract = catalog
        .find_contract(&criteria.hotel_id, &criteria.market_id)
        .ok_or_else(|| EngineError::ContractNotFound {
            hotel_id: criteria.hotel_id.clone(),
            market_id: criteria.market_id.clone(),
        })?;

    let offers = criteria
        .offer_ids
        .iter()
        .map(|id| {
            catalog
                .find_offer(id)
                .ok_or_else(|| EngineError::UnknownOffer {
                    offer_id: id.clone(),
                })
        })
        .collect::<EngineResult<Vec<&Offer>>>()?;

    let supplements = criteria
        .supplements
        .iter()
        .map(|request| {
            catalog
                .find_supplement(&request.supplement_id)
                .map(|supplement| (supplement, request.quantity))
                .ok_or_else(|| EngineError::UnknownSupplement {
                    supplement_id: request.supplement_id.clone(),
                })
        })
        .collect::<EngineResult<Vec<(&Supplement, u32)>>>()?;

    info!(
        hotel_id = %criteria.hotel_id,
        market_id = %criteria.market_id,
        contract_id = %contract.id,
        nights = criteria.total_nights,
        rooms = criteria.rooms.len(),
        offers = offers.len(),
        supplements = supplements.len(),
        "Pricing stay"
    );

    let mut trace = AuditTrace::default();
    let step_number = trace.next_step_number();
    trace.steps.push(AuditStep {
        step_number,
        rule_id: "contract_resolution".to_string(),
        rule_name: "Contract Resolution".to_string(),
        input: serde_json::json!({
            "hotel_id": criteria.hotel_id,
            "market_id": criteria.market_id
        }),
        output: serde_json::json!({
            "contract_id": contract.id,
            "currency": contract.currency,
            "periods": contract.periods.len()
        }),
        reasoning: format!(
            "Contract {} prices hotel {} for market {} in {}",
            contract.id, criteria.hotel_id, criteria.market_id, contract.currency
        ),
    });

    let nightly = price_nights(contract, criteria, &offers, trace.next_step_number())?;
    trace.steps.extend(nightly.audit_steps);
    trace.warnings.extend(nightly.warnings);

    let mut supplement_lines = Vec::with_capacity(supplements.len());
    if !supplements.is_empty() {
        let nights: Vec<_> = criteria.nights().collect();
        let stay_offers = stay_active_offers(&offers, &nights, OfferContext::Supplement);
        let stay_discount = compose_discount(&stay_offers, trace.next_step_number());
        let mut step = stay_discount.audit_step;
        step.rule_id = "supplement_discount_composition".to_string();
        step.rule_name = "Supplement Discount Composition".to_string();
        trace.steps.push(step);

        for (supplement, quantity) in supplements {
            let pricing = price_supplement(
                supplement,
                quantity,
                criteria.total_nights,
                stay_discount.multiplier,
                trace.next_step_number(),
            );
            debug!(
                supplement_id = %supplement.id,
                amount = %pricing.line.amount,
                "Priced supplement"
            );
            trace.steps.push(pricing.audit_step);
            supplement_lines.push(pricing.line);
        }
    }

    let totals = aggregate_totals(
        &nightly.breakdown,
        &supplement_lines,
        trace.next_step_number(),
    );
    trace.steps.push(totals.audit_step);

    info!(
        contract_id = %contract.id,
        total_amount = %totals.total_amount,
        discount_amount = %totals.discount_amount,
        warnings = trace.warnings.len(),
        "Stay priced"
    );

    Ok(PricingResult {
        hotel_id: criteria.hotel_id.clone(),
        market_id: criteria.market_id.clone(),
        contract_id: contract.id.clone(),
        currency: contract.currency.clone(),
        check_in: criteria.check_in,
        check_out: criteria.check_out,
        total_nights: criteria.total_nights,
        rooms_subtotal: totals.rooms_subtotal,
        discount_amount: totals.discount_amount,
        supplements_total: totals.supplements_total,
        total_amount: totals.total_amount,
        breakdown: nightly.breakdown,
        supplements: supplement_lines,
        audit_trace: trace,
    })
}
