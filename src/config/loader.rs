//! Catalog loading functionality.
//!
//! This module provides the [`CatalogLoader`] type for loading hotel
//! catalogs from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, Supplement};

use super::types::{AgeCategoriesConfig, Catalog, OffersConfig, SupplementsConfig};

/// Loads and provides access to a hotel catalog.
///
/// The `CatalogLoader` reads YAML files from a directory, validates them
/// into a [`Catalog`], and provides lookups that fail with engine errors.
///
/// # Directory Structure
///
/// The catalog directory should have the following structure:
/// ```text
/// config/riviera_resort/
/// ├── age_categories.yaml  # Age bands per hotel
/// ├── offers.yaml          # Promotional offers
/// ├── supplements.yaml     # Ancillary services
/// └── contracts/
///     └── riviera_uk_2026.yaml  # One contract per hotel and market
/// ```
///
/// # Example
///
/// ```no_run
/// use hotel_pricing_engine::config::CatalogLoader;
///
/// let loader = CatalogLoader::load("./config/riviera_resort").unwrap();
///
/// let supplement = loader.get_supplement("spa_access").unwrap();
/// println!("Supplement: {} at {}", supplement.name, supplement.price);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog: Catalog,
}

impl CatalogLoader {
    /// Loads a catalog from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the catalog directory (e.g., "./config/riviera_resort")
    ///
    /// # Returns
    ///
    /// Returns a `CatalogLoader` instance on success, or an error if:
    /// - Any required file is missing, or the contracts directory holds no contract
    /// - Any file contains invalid YAML or misses a required field
    /// - The records break a catalog rule (see [`Catalog::new`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hotel_pricing_engine::config::CatalogLoader;
    ///
    /// let loader = CatalogLoader::load("./config/riviera_resort")?;
    /// # Ok::<(), hotel_pricing_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let age_categories =
            Self::load_yaml::<AgeCategoriesConfig>(&path.join("age_categories.yaml"))?;
        let offers = Self::load_yaml::<OffersConfig>(&path.join("offers.yaml"))?;
        let supplements = Self::load_yaml::<SupplementsConfig>(&path.join("supplements.yaml"))?;
        let contracts = Self::load_contracts(&path.join("contracts"))?;

        let catalog = Catalog::new(
            contracts,
            offers.offers,
            supplements.supplements,
            age_categories.age_categories,
        )?;

        info!(
            path = %path.display(),
            contracts = catalog.contracts().len(),
            offers = catalog.offers().len(),
            supplements = catalog.supplements().len(),
            "Catalog loaded"
        );

        Ok(Self { catalog })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::CatalogNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::CatalogParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every contract file from the contracts directory.
    ///
    /// Files are read in name order so errors are reported deterministically.
    fn load_contracts(contracts_dir: &Path) -> EngineResult<Vec<Contract>> {
        let contracts_dir_str = contracts_dir.display().to_string();

        let entries = fs::read_dir(contracts_dir).map_err(|_| EngineError::CatalogNotFound {
            path: contracts_dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::CatalogNotFound {
                path: contracts_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(EngineError::CatalogNotFound {
                path: format!("{} (no contract files found)", contracts_dir_str),
            });
        }

        paths
            .iter()
            .map(|path| Self::load_yaml::<Contract>(path))
            .collect()
    }

    /// Returns the validated catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Gets a supplement by its id.
    ///
    /// # Returns
    ///
    /// Returns the supplement if found, or `UnknownSupplement` error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hotel_pricing_engine::config::CatalogLoader;
    ///
    /// let loader = CatalogLoader::load("./config/riviera_resort")?;
    /// let supplement = loader.get_supplement("spa_access")?;
    /// println!("Supplement: {}", supplement.name);
    /// # Ok::<(), hotel_pricing_engine::error::EngineError>(())
    /// ```
    pub fn get_supplement(&self, supplement_id: &str) -> EngineResult<&Supplement> {
        self.catalog
            .supplements()
            .get(supplement_id)
            .ok_or_else(|| EngineError::UnknownSupplement {
                supplement_id: supplement_id.to_string(),
            })
    }
}
