//! Invoice
//!
//! Sales invoices produced at checkout. Totals are computed from the cart
//! lines at construction, so the arithmetic invariant (subtotal = Σ price×qty,
//! tax = 13% of subtotal, total = subtotal + tax) holds for every invoice.

use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{cart::CartItem, money};

/// Subtotal, IVA and grand total for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of line totals before tax.
    pub subtotal: Decimal,

    /// 13% IVA on the subtotal, rounded to cents.
    pub tax: Decimal,

    /// Subtotal plus tax.
    pub total: Decimal,
}

impl Totals {
    /// Computes totals over cart lines.
    #[must_use]
    pub fn of_items<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Self {
        let subtotal: Decimal = items.into_iter().map(CartItem::line_total).sum();
        let tax = money::iva(subtotal);

        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Lifecycle of an invoice. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created at checkout.
    Generated,

    /// Emailed to the customer.
    Sent,

    /// Payment settled.
    Paid,
}

impl InvoiceStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Generated => 0,
            Self::Sent => 1,
            Self::Paid => 2,
        }
    }

    /// Whether moving to `next` keeps the lifecycle moving forward.
    #[must_use]
    pub fn allows(self, next: Self) -> bool {
        next.rank() >= self.rank()
    }

    /// Status name as stored and displayed.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Sent => "sent",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from invoice lifecycle operations.
#[derive(Debug, Error, PartialEq)]
pub enum InvoiceError {
    /// Attempted to move the status backwards.
    #[error("invoice status cannot move from {from} to {to}")]
    BackwardStatus {
        /// Current status.
        from: InvoiceStatus,
        /// Requested status.
        to: InvoiceStatus,
    },
}

/// Identity fields of the invoiced customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Name or razón social.
    pub name: String,

    /// Tax id (NIT, or DUI when it contains a dash).
    pub nit: String,

    /// Email address.
    pub email: String,
}

/// Attribution of the cashier who rang up the sale, when there was one.
#[derive(Debug, Clone, PartialEq)]
pub struct CashierRef {
    /// Cashier display name.
    pub name: String,

    /// Cashier user id.
    pub id: String,
}

/// A sales invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice id (`INV-{millis}`).
    pub id: String,

    /// Customer name.
    pub customer_name: String,

    /// Customer tax id.
    #[serde(rename = "customerNIT")]
    pub customer_nit: String,

    /// Customer email.
    pub customer_email: String,

    /// Cart lines copied at checkout.
    pub items: Vec<CartItem>,

    /// Sum of line totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    /// 13% IVA.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,

    /// Amount payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Issue date.
    pub date: Date,

    /// Lifecycle status.
    pub status: InvoiceStatus,

    /// Cashier name, when a cashier rang up the sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashier_name: Option<String>,

    /// Cashier user id, when a cashier rang up the sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashier_id: Option<String>,
}

impl Invoice {
    /// Issues a new invoice over the given cart lines, computing totals.
    #[must_use]
    pub fn issue(
        id: String,
        customer: Customer,
        items: Vec<CartItem>,
        date: Date,
        cashier: Option<CashierRef>,
    ) -> Self {
        let totals = Totals::of_items(&items);
        let (cashier_name, cashier_id) = match cashier {
            Some(cashier) => (Some(cashier.name), Some(cashier.id)),
            None => (None, None),
        };

        Self {
            id,
            customer_name: customer.name,
            customer_nit: customer.nit,
            customer_email: customer.email,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            date,
            status: InvoiceStatus::Generated,
            cashier_name,
            cashier_id,
        }
    }

    /// Moves the invoice to a later lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`InvoiceError::BackwardStatus`] if `next` is earlier than the
    /// current status.
    pub fn advance_status(&mut self, next: InvoiceStatus) -> Result<(), InvoiceError> {
        if !self.status.allows(next) {
            return Err(InvoiceError::BackwardStatus {
                from: self.status,
                to: next,
            });
        }

        self.status = next;

        Ok(())
    }
}
