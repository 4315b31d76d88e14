//! Base room price resolution.
//!
//! This module resolves the nightly base price of a room from its period
//! rate and the requested occupancy.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, OccupancyKey, RoomPrice, RoomRate};

/// Warning code raised when an occupancy row's breakdown disagrees with its total.
pub const OCCUPANCY_TOTAL_MISMATCH: &str = "OCCUPANCY_TOTAL_MISMATCH";

/// The result of a rate resolution, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct RateResolution {
    /// The nightly base room price.
    pub rate: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
    /// Set when the matched occupancy row is internally inconsistent.
    pub warning: Option<AuditWarning>,
}

/// Resolves the nightly base price of a room for an occupancy.
///
/// A `per_room` price is returned unchanged whatever the occupancy. A
/// `per_occupancy` price needs a row for the exact `(adults, children)` pair;
/// there is no nearest-match fallback. The row's `total_rate` is the price even
/// when its per-guest breakdown sums to something else, in which case a
/// warning is attached.
///
/// # Errors
///
/// Returns `UnresolvedOccupancy` when no row matches the occupancy.
///
/// # Examples
///
/// ```
/// use hotel_pricing_engine::calculation::resolve_base_price;
/// use hotel_pricing_engine::models::{OccupancyKey, RoomPrice, RoomRate};
/// use rust_decimal::Decimal;
///
/// let room_price = RoomPrice {
///     room_type_id: "double".to_string(),
///     rate: RoomRate::PerRoom { price_per_night: Decimal::from(100) },
/// };
///
/// let resolution = resolve_base_price(&room_price, OccupancyKey::new(3, 1), 1).unwrap();
/// assert_eq!(resolution.rate, Decimal::from(100));
/// ```
pub fn resolve_base_price(
    room_price: &RoomPrice,
    occupancy: OccupancyKey,
    step_number: u32,
) -> EngineResult<RateResolution> {
    match &room_price.rate {
        RoomRate::PerRoom { price_per_night } => {
            let audit_step = AuditStep {
                step_number,
                rule_id: "rate_resolution".to_string(),
                rule_name: "Rate Resolution".to_string(),
                input: serde_json::json!({
                    "room_type_id": room_price.room_type_id,
                    "pricing_mode": room_price.rate.mode_name(),
                    "occupancy": occupancy.to_string()
                }),
                output: serde_json::json!({
                    "rate": price_per_night.to_string()
                }),
                reasoning: format!(
                    "Flat room price {} applies to any occupancy",
                    price_per_night
                ),
            };

            Ok(RateResolution {
                rate: *price_per_night,
                audit_step,
                warning: None,
            })
        }
        RoomRate::PerOccupancy { occupancy_rates } => {
            let row = occupancy_rates
                .iter()
                .find(|r| r.key() == occupancy)
                .ok_or_else(|| EngineError::UnresolvedOccupancy {
                    room_type_id: room_price.room_type_id.clone(),
                    num_adults: occupancy.num_adults,
                    num_children: occupancy.num_children,
                })?;

            let warning = match row.components_total() {
                Some(components) if components != row.total_rate => {
                    warn!(
                        room_type_id = %room_price.room_type_id,
                        occupancy = %occupancy,
                        total_rate = %row.total_rate,
                        components_total = %components,
                        "Occupancy rate breakdown does not sum to its total"
                    );
                    Some(AuditWarning {
                        code: OCCUPANCY_TOTAL_MISMATCH.to_string(),
                        message: format!(
                            "Room type '{}' occupancy {}: per-guest rates sum to {} but total_rate is {}; total_rate used",
                            room_price.room_type_id, occupancy, components, row.total_rate
                        ),
                        severity: "medium".to_string(),
                    })
                }
                _ => None,
            };

            let audit_step = AuditStep {
                step_number,
                rule_id: "rate_resolution".to_string(),
                rule_name: "Rate Resolution".to_string(),
                input: serde_json::json!({
                    "room_type_id": room_price.room_type_id,
                    "pricing_mode": room_price.rate.mode_name(),
                    "occupancy": occupancy.to_string()
                }),
                output: serde_json::json!({
                    "rate": row.total_rate.to_string(),
                    "guest_rates": row.rates_per_age.len()
                }),
                reasoning: format!(
                    "Occupancy {} adults / {} children matched: {}",
                    occupancy.num_adults, occupancy.num_children, row.total_rate
                ),
            };

            Ok(RateResolution {
                rate: row.total_rate,
                audit_step,
                warning,
            })
        }
    }
}
