//! Ancillary supplement models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The unit a supplement price is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementUnit {
    /// Charged once per person for the whole stay.
    PerPersonPerStay,
    /// Charged per room for every night.
    PerRoomPerNight,
    /// Charged once per room for the whole stay.
    PerRoomPerStay,
}

impl SupplementUnit {
    /// Returns the unit name used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplementUnit::PerPersonPerStay => "per_person_per_stay",
            SupplementUnit::PerRoomPerNight => "per_room_per_night",
            SupplementUnit::PerRoomPerStay => "per_room_per_stay",
        }
    }
}

/// An optional extra sold with a stay (transfer, spa access, parking...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplement {
    /// Unique identifier of the supplement.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price per unit.
    pub price: Decimal,
    /// The unit the price is quoted in.
    pub unit: SupplementUnit,
    /// When true, stay-level offers also discount this supplement.
    #[serde(default)]
    pub can_receive_discount: bool,
}
