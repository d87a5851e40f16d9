//! Fixtures
//!
//! YAML catalog fixtures. The demo storefront ships its product list as a
//! fixture file rather than hard-coding it.

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, Product};

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading a fixture file.
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The fixture contained conflicting products.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// On-disk shape of a products fixture file.
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order.
    pub products: Vec<Product>,
}

/// Parses a catalog from YAML fixture contents.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is malformed or contains duplicate
/// product codes.
pub fn catalog_from_str(yaml: &str) -> Result<Catalog, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(yaml)?;

    Ok(Catalog::from_products(fixture.products)?)
}

/// Loads a catalog from a YAML fixture file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog, FixtureError> {
    let contents = fs::read_to_string(path)?;

    catalog_from_str(&contents)
}
