//! Hotel Pricing Engine for contract-based stay pricing
//!
//! This crate provides functionality for pricing hotel stays night by night
//! against seasonal contracts, applying promotional offers, meal plan
//! surcharges and ancillary supplements, and producing a reconciled invoice
//! with a full audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
