//! Core data models for the Hotel Pricing Engine.
//!
//! This module contains the contract, offer and supplement records the engine
//! reads, the criteria it prices, and the result it produces.

mod contract;
mod criteria;
mod offer;
mod pricing_result;
mod supplement;

pub use contract::{
    AgeCategory, AgeCategoryRate, Contract, ContractPeriod, MealPlanSupplement, MealPlanSurcharge,
    OccupancyKey, OccupancyRate, RoomPrice, RoomRate,
};
pub use criteria::{PricingCriteria, RoomRequest, SupplementRequest};
pub use offer::{DiscountMode, Offer, OfferEffect, OfferPeriod};
pub use pricing_result::{
    AuditStep, AuditTrace, AuditWarning, NightlyBreakdownEntry, PricingResult, SupplementLine,
};
pub use supplement::{Supplement, SupplementUnit};
