//! Money
//!
//! Decimal helpers for the dollarized storefront: the fixed IVA rate,
//! two-decimal rounding and USD display formatting.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};

/// The fixed Salvadoran VAT (IVA) rate of 13%.
#[must_use]
pub fn iva_rate() -> Percentage {
    Percentage::from(0.13)
}

/// Rounds a currency amount to two decimal places, half away from zero.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// IVA owed on a taxable subtotal, rounded to cents.
#[must_use]
pub fn iva(subtotal: Decimal) -> Decimal {
    round2(iva_rate() * subtotal)
}

/// Wraps an amount as US dollars for display formatting.
#[must_use]
pub fn usd(amount: Decimal) -> Money<'static, iso::Currency> {
    Money::from_decimal(amount, iso::USD)
}
