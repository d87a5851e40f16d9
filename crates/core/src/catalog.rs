//! Catalog
//!
//! The product catalog: a keyed store of products with a code index, mutated
//! only through the admin operations (insert, partial update, remove).

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// A product offered by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned product code (the line-item `codigo` on tax documents).
    pub code: String,

    /// Display name.
    pub name: String,

    /// Unit price in USD.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units on hand.
    pub stock: u32,

    /// Display category.
    pub category: String,

    /// Product image URL.
    pub image: String,
}

/// Partial update applied to an existing product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    /// New display name, if changing.
    pub name: Option<String>,

    /// New unit price, if changing.
    pub price: Option<Decimal>,

    /// New stock level, if changing.
    pub stock: Option<u32>,

    /// New category, if changing.
    pub category: Option<String>,

    /// New image URL, if changing.
    pub image: Option<String>,
}

/// Errors from catalog operations.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product with the same code is already in the catalog.
    #[error("product {0} already exists")]
    DuplicateCode(String),

    /// No product with the given code.
    #[error("product {0} not found")]
    NotFound(String),
}

/// Product catalog with code-based lookup.
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    by_code: FxHashMap<String, ProductKey>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCode`] if two products share a code.
    pub fn from_products(
        products: impl IntoIterator<Item = Product>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for product in products {
            catalog.insert(product)?;
        }

        Ok(catalog)
    }

    /// Adds a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCode`] if the code is already taken.
    pub fn insert(&mut self, product: Product) -> Result<ProductKey, CatalogError> {
        if self.by_code.contains_key(&product.code) {
            return Err(CatalogError::DuplicateCode(product.code));
        }

        let code = product.code.clone();
        let key = self.products.insert(product);

        self.by_code.insert(code, key);

        Ok(key)
    }

    /// Looks up a product by key.
    #[must_use]
    pub fn get(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Looks up a product by code.
    #[must_use]
    pub fn get_by_code(&self, code: &str) -> Option<&Product> {
        self.by_code
            .get(code)
            .and_then(|key| self.products.get(*key))
    }

    /// Looks up a product's key by code.
    #[must_use]
    pub fn key_of(&self, code: &str) -> Option<ProductKey> {
        self.by_code.get(code).copied()
    }

    /// Applies a partial update to the product with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the code is unknown.
    pub fn update(&mut self, code: &str, update: ProductUpdate) -> Result<&Product, CatalogError> {
        let key = self
            .by_code
            .get(code)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))?;

        let product = self
            .products
            .get_mut(key)
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))?;

        if let Some(name) = update.name {
            product.name = name;
        }

        if let Some(price) = update.price {
            product.price = price;
        }

        if let Some(stock) = update.stock {
            product.stock = stock;
        }

        if let Some(category) = update.category {
            product.category = category;
        }

        if let Some(image) = update.image {
            product.image = image;
        }

        Ok(product)
    }

    /// Removes the product with the given code.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the code is unknown.
    pub fn remove(&mut self, code: &str) -> Result<Product, CatalogError> {
        let key = self
            .by_code
            .remove(code)
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))?;

        self.products
            .remove(key)
            .ok_or_else(|| CatalogError::NotFound(code.to_string()))
    }

    /// Iterates over the products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Snapshot of all products, for persistence.
    #[must_use]
    pub fn to_products(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
