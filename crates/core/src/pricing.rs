//! Pricing
//!
//! Derived sale totals. Every monetary step is rounded to the cent
//! (midpoint away from zero) before it feeds the next one, so
//! `net_subtotal` is computed from an already-rounded subtotal and
//! discount, and tax and tip from the rounded net subtotal.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use serde::Serialize;

use crate::{context::DiscountPercent, lines::CartLine};

/// Value-added tax charged on the discounted subtotal (19%).
pub const TAX_RATE: Decimal = Decimal::from_parts(19, 0, 0, false, 2);

/// Suggested tip added on the discounted subtotal (10%).
pub const TIP_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Rounds an amount to the cent, half up.
#[must_use]
pub fn round_to_cent(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Totals for a cart at one point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of line prices.
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    /// Amount taken off by the sale discount.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,

    /// Subtotal after discount; tax and tip are computed on this.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_subtotal: Decimal,

    /// Tax on the net subtotal.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,

    /// Tip on the net subtotal.
    #[serde(with = "rust_decimal::serde::float")]
    pub tip: Decimal,

    /// Amount due.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Totals {
    /// Expresses an amount as money in the given currency, in minor units.
    ///
    /// The amount is rounded to the cent first, half up. Amounts carry two
    /// decimals; currencies with another exponent get the cents
    /// reinterpreted, so callers should pick a two-decimal currency.
    #[must_use]
    pub fn money(amount: Decimal, currency: &Currency) -> Money<'_, Currency> {
        Money::from_minor(to_minor_units(amount), currency)
    }
}

/// Whole cents in `amount`, saturating at the bounds of `i64`.
fn to_minor_units(amount: Decimal) -> i64 {
    use rust_decimal::prelude::ToPrimitive;

    let saturated = if amount.is_sign_negative() { i64::MIN } else { i64::MAX };

    round_to_cent(amount)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|minor| minor.trunc().to_i64())
        .unwrap_or(saturated)
}

/// Computes the totals for `lines` under `discount`.
///
/// Pure: the same lines and discount always give identical totals. Sums
/// saturate at [`Decimal::MAX`] instead of overflowing.
pub fn compute_totals<'a>(
    lines: impl IntoIterator<Item = &'a CartLine>,
    discount: DiscountPercent,
) -> Totals {
    let subtotal = round_to_cent(
        lines
            .into_iter()
            .map(CartLine::extended_price)
            .fold(Decimal::ZERO, Decimal::saturating_add),
    );
    let discount_amount = round_to_cent(discount.fraction() * subtotal);
    let net_subtotal = subtotal - discount_amount;
    let tax = round_to_cent(net_subtotal * TAX_RATE);
    let tip = round_to_cent(net_subtotal * TIP_RATE);

    Totals {
        subtotal,
        discount_amount,
        net_subtotal,
        tax,
        tip,
        total: net_subtotal.saturating_add(tax).saturating_add(tip),
    }
}
