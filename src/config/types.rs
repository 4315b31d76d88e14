//! Catalog types for contract pricing.
//!
//! This module contains the read-only [`PricingCatalog`] interface the engine
//! prices against, the validated in-memory [`Catalog`] that implements it, and
//! the file structures deserialized from YAML catalog files.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AgeCategory, Contract, ContractPeriod, Offer, OfferEffect, RoomRate, Supplement,
};

/// Read-only access to the records a price calculation needs.
///
/// The engine receives an implementation per call and never mutates it.
pub trait PricingCatalog {
    /// Returns the single contract of a hotel for a market.
    fn find_contract(&self, hotel_id: &str, market_id: &str) -> Option<&Contract>;

    /// Returns an offer by id.
    fn find_offer(&self, offer_id: &str) -> Option<&Offer>;

    /// Returns a supplement by id.
    fn find_supplement(&self, supplement_id: &str) -> Option<&Supplement>;
}

/// Age categories file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeCategoriesConfig {
    /// Age categories of every hotel in the catalog.
    pub age_categories: Vec<AgeCategory>,
}

/// Offers file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct OffersConfig {
    /// All offers in the catalog.
    pub offers: Vec<Offer>,
}

/// Supplements file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SupplementsConfig {
    /// All supplements in the catalog.
    pub supplements: Vec<Supplement>,
}

/// A validated set of contracts, offers and supplements.
///
/// Construction checks the structural rules the engine relies on, so a
/// `Catalog` never holds two contracts for one hotel and market, overlapping
/// periods, or ambiguous occupancy rows.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Contracts with periods sorted by start date.
    contracts: Vec<Contract>,
    /// Offers by id.
    offers: HashMap<String, Offer>,
    /// Supplements by id.
    supplements: HashMap<String, Supplement>,
}

impl Catalog {
    /// Creates a catalog from its component parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCatalog` when:
    /// - two contracts share a hotel and market, or two offers/supplements share an id
    /// - a period ends before it starts, or two periods of a contract overlap
    /// - a period prices a room type twice, or lists a meal plan twice
    /// - an occupancy or meal plan table repeats an `(adults, children)` row
    /// - an occupancy breakdown repeats an `(age_category_id, sequence)` key or
    ///   references an age category the hotel does not define
    /// - an offer has no validity period or a period ending before it starts
    /// - an offer percentage lies outside `[0, 100]`
    /// - a hotel's age categories repeat an id or overlap in age
    pub fn new(
        contracts: Vec<Contract>,
        offers: Vec<Offer>,
        supplements: Vec<Supplement>,
        age_categories: Vec<AgeCategory>,
    ) -> EngineResult<Self> {
        validate_age_categories(&age_categories)?;

        let mut seen_markets = HashSet::new();
        let mut sorted_contracts = Vec::with_capacity(contracts.len());
        for mut contract in contracts {
            if !seen_markets.insert((contract.hotel_id.clone(), contract.market_id.clone())) {
                return Err(invalid(format!(
                    "more than one contract for hotel '{}' in market '{}'",
                    contract.hotel_id, contract.market_id
                )));
            }
            contract.sort_periods();
            validate_contract(&contract, &age_categories)?;
            sorted_contracts.push(contract);
        }

        let mut offers_by_id = HashMap::with_capacity(offers.len());
        for offer in offers {
            validate_offer(&offer)?;
            if offers_by_id.contains_key(&offer.id) {
                return Err(invalid(format!("duplicate offer id '{}'", offer.id)));
            }
            offers_by_id.insert(offer.id.clone(), offer);
        }

        let mut supplements_by_id = HashMap::with_capacity(supplements.len());
        for supplement in supplements {
            if supplements_by_id.contains_key(&supplement.id) {
                return Err(invalid(format!(
                    "duplicate supplement id '{}'",
                    supplement.id
                )));
            }
            supplements_by_id.insert(supplement.id.clone(), supplement);
        }

        Ok(Self {
            contracts: sorted_contracts,
            offers: offers_by_id,
            supplements: supplements_by_id,
        })
    }

    /// Returns all contracts.
    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    /// Returns all offers by id.
    pub fn offers(&self) -> &HashMap<String, Offer> {
        &self.offers
    }

    /// Returns all supplements by id.
    pub fn supplements(&self) -> &HashMap<String, Supplement> {
        &self.supplements
    }
}

impl PricingCatalog for Catalog {
    fn find_contract(&self, hotel_id: &str, market_id: &str) -> Option<&Contract> {
        self.contracts
            .iter()
            .find(|c| c.hotel_id == hotel_id && c.market_id == market_id)
    }

    fn find_offer(&self, offer_id: &str) -> Option<&Offer> {
        self.offers.get(offer_id)
    }

    fn find_supplement(&self, supplement_id: &str) -> Option<&Supplement> {
        self.supplements.get(supplement_id)
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidCatalog { message }
}

fn validate_age_categories(age_categories: &[AgeCategory]) -> EngineResult<()> {
    for (index, category) in age_categories.iter().enumerate() {
        if category.max_age < category.min_age {
            return Err(invalid(format!(
                "age category '{}' has max_age below min_age",
                category.id
            )));
        }

        for other in &age_categories[index + 1..] {
            if other.hotel_id != category.hotel_id {
                continue;
            }
            if other.id == category.id {
                return Err(invalid(format!(
                    "hotel '{}' defines age category '{}' twice",
                    category.hotel_id, category.id
                )));
            }
            if category.contains_age(other.min_age) || other.contains_age(category.min_age) {
                return Err(invalid(format!(
                    "hotel '{}' age categories '{}' and '{}' overlap",
                    category.hotel_id, category.id, other.id
                )));
            }
        }
    }
    Ok(())
}

fn validate_contract(contract: &Contract, age_categories: &[AgeCategory]) -> EngineResult<()> {
    let known_categories: HashSet<&str> = age_categories
        .iter()
        .filter(|c| c.hotel_id == contract.hotel_id)
        .map(|c| c.id.as_str())
        .collect();

    for period in &contract.periods {
        if period.end_date < period.start_date {
            return Err(invalid(format!(
                "contract '{}' period '{}' ends before it starts",
                contract.id, period.id
            )));
        }
        validate_period(contract, period, &known_categories)?;
    }

    // Periods are sorted, so any overlap shows up between neighbours.
    for pair in contract.periods.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(invalid(format!(
                "contract '{}' periods '{}' and '{}' overlap",
                contract.id, pair[0].id, pair[1].id
            )));
        }
    }

    Ok(())
}

fn validate_period(
    contract: &Contract,
    period: &ContractPeriod,
    known_categories: &HashSet<&str>,
) -> EngineResult<()> {
    let mut room_types = HashSet::new();
    for room_price in &period.room_prices {
        if !room_types.insert(room_price.room_type_id.as_str()) {
            return Err(invalid(format!(
                "contract '{}' period '{}' prices room type '{}' twice",
                contract.id, period.id, room_price.room_type_id
            )));
        }

        if let RoomRate::PerOccupancy { occupancy_rates } = &room_price.rate {
            let mut occupancies = HashSet::new();
            for row in occupancy_rates {
                if !occupancies.insert(row.key()) {
                    return Err(invalid(format!(
                        "room type '{}' in period '{}' has two rates for occupancy {}",
                        room_price.room_type_id,
                        period.id,
                        row.key()
                    )));
                }

                let mut guest_keys = HashSet::new();
                for guest in &row.rates_per_age {
                    if !known_categories.contains(guest.age_category_id.as_str()) {
                        return Err(invalid(format!(
                            "room type '{}' in period '{}' references unknown age category '{}'",
                            room_price.room_type_id, period.id, guest.age_category_id
                        )));
                    }
                    if !guest_keys.insert(guest.key()) {
                        return Err(invalid(format!(
                            "room type '{}' in period '{}' occupancy {} repeats age category '{}' sequence {}",
                            room_price.room_type_id,
                            period.id,
                            row.key(),
                            guest.age_category_id,
                            guest.sequence
                        )));
                    }
                }
            }
        }
    }

    let mut meal_plans = HashSet::new();
    for table in &period.meal_plan_supplements {
        if !meal_plans.insert(table.meal_plan_id.as_str()) {
            return Err(invalid(format!(
                "period '{}' lists meal plan '{}' twice",
                period.id, table.meal_plan_id
            )));
        }
        let mut occupancies = HashSet::new();
        for row in &table.surcharges {
            if !occupancies.insert(row.key()) {
                return Err(invalid(format!(
                    "meal plan '{}' in period '{}' has two surcharges for occupancy {}",
                    table.meal_plan_id,
                    period.id,
                    row.key()
                )));
            }
        }
    }

    Ok(())
}

fn validate_offer(offer: &Offer) -> EngineResult<()> {
    if offer.periods.is_empty() {
        return Err(invalid(format!(
            "offer '{}' has no validity period",
            offer.id
        )));
    }
    if offer.periods.iter().any(|p| p.end_date < p.start_date) {
        return Err(invalid(format!(
            "offer '{}' has a period ending before it starts",
            offer.id
        )));
    }
    match &offer.effect {
        OfferEffect::Percentage { value }
            if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED =>
        {
            Err(invalid(format!(
                "offer '{}' has percentage {} outside 0 to 100",
                offer.id, value
            )))
        }
        OfferEffect::Percentage { .. } => Ok(()),
    }
}
