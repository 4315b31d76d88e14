//! Catalog loading and access for the Hotel Pricing Engine.
//!
//! This module provides functionality to load a hotel catalog from YAML files,
//! including contracts, age categories, offers and supplements, and the
//! [`PricingCatalog`] interface the engine prices against.
//!
//! # Example
//!
//! ```no_run
//! use hotel_pricing_engine::config::{CatalogLoader, PricingCatalog};
//!
//! let loader = CatalogLoader::load("./config/riviera_resort").unwrap();
//! let contract = loader.catalog().find_contract("riviera_resort", "uk");
//! println!("Contract found: {}", contract.is_some());
//! ```

mod loader;
mod types;

pub use loader::CatalogLoader;
pub use types::{AgeCategoriesConfig, Catalog, OffersConfig, PricingCatalog, SupplementsConfig};
