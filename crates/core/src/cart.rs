//! Cart
//!
//! The shopping cart: product snapshots with quantities. Adding an existing
//! product merges quantities; setting a quantity to zero removes the line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use crate::catalog::Product;

/// A cart line: a product snapshot and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Snapshot of the product at the time it was added.
    pub product: Product,

    /// Units of the product in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Price of the line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// No line with the given product code.
    #[error("product {0} is not in the cart")]
    ItemNotFound(String),

    /// The product has no stock left.
    #[error("product {0} is out of stock")]
    OutOfStock(String),
}

/// Shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: SmallVec<[CartItem; 8]>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units of a product, merging into an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] if the product has zero stock.
    pub fn add(&mut self, product: Product, quantity: u32) -> Result<(), CartError> {
        if product.stock == 0 {
            return Err(CartError::OutOfStock(product.code));
        }

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.code == product.code)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem { product, quantity });
        }

        Ok(())
    }

    /// Sets the quantity of a line; zero removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given code.
    pub fn set_quantity(&mut self, code: &str, quantity: u32) -> Result<(), CartError> {
        let position = self
            .items
            .iter()
            .position(|line| line.product.code == code)
            .ok_or_else(|| CartError::ItemNotFound(code.to_string()))?;

        if quantity == 0 {
            self.items.remove(position);
        } else if let Some(line) = self.items.get_mut(position) {
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Removes a line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if no line has the given code.
    pub fn remove(&mut self, code: &str) -> Result<CartItem, CartError> {
        let position = self
            .items
            .iter()
            .position(|line| line.product.code == code)
            .ok_or_else(|| CartError::ItemNotFound(code.to_string()))?;

        Ok(self.items.remove(position))
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Iterates over the cart lines.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Number of lines (not units) in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn product(code: &str, price: Decimal, stock: u32) -> Product {
        Product {
            code: code.to_string(),
            name: format!("Producto {code}"),
            price,
            stock,
            category: "Accesorios".to_string(),
            image: String::new(),
        }
    }

    #[test]
    fn add_merges_lines_with_same_code() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product("1", Decimal::new(3500, 2), 10), 1)?;
        cart.add(product("1", Decimal::new(3500, 2), 10), 2)?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items().first().map(|line| line.quantity), Some(3));

        Ok(())
    }

    #[test]
    fn add_out_of_stock_errors() {
        let mut cart = Cart::new();

        let result = cart.add(product("1", Decimal::ONE, 0), 1);

        assert_eq!(result, Err(CartError::OutOfStock("1".to_string())));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_removes_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product("1", Decimal::ONE, 5), 2)?;
        cart.set_quantity("1", 0)?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_replaces_count() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product("1", Decimal::ONE, 5), 2)?;
        cart.set_quantity("1", 7)?;

        assert_eq!(cart.items().first().map(|line| line.quantity), Some(7));

        Ok(())
    }

    #[test]
    fn set_quantity_unknown_code_errors() {
        let mut cart = Cart::new();

        let result = cart.set_quantity("9", 1);

        assert_eq!(result, Err(CartError::ItemNotFound("9".to_string())));
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product("1", Decimal::new(125_000, 2), 15), 1)?;
        cart.add(product("2", Decimal::new(8500, 2), 45), 2)?;

        // 1250.00 + 2 * 85.00
        assert_eq!(cart.subtotal(), Decimal::new(142_000, 2));

        Ok(())
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        let cart = Cart::new();

        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn remove_returns_the_line() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product("1", Decimal::ONE, 5), 2)?;

        let removed = cart.remove("1")?;

        assert_eq!(removed.quantity, 2);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn clear_empties_all_lines() -> TestResult {
        let mut cart = Cart::new();

        cart.add(product("1", Decimal::ONE, 5), 1)?;
        cart.add(product("2", Decimal::ONE, 5), 1)?;
        cart.clear();

        assert!(cart.is_empty());

        Ok(())
    }
}
