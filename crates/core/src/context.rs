//! Checkout Context

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whole-sale discount in percent points, always within `[0, 100]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// Upper bound, a full discount.
    pub const MAX: Decimal = Decimal::ONE_HUNDRED;

    /// Clamps `points` into `[0, 100]`. Out-of-range values are never rejected.
    #[must_use]
    pub fn clamped(points: Decimal) -> Self {
        Self(points.clamp(Decimal::ZERO, Self::MAX))
    }

    /// Percent points, e.g. `10` for ten percent.
    #[must_use]
    pub fn points(self) -> Decimal {
        self.0
    }

    /// The discount as a fraction of the amount it applies to.
    #[must_use]
    pub fn fraction(self) -> Percentage {
        Percentage::from(self.0 / Self::MAX)
    }

    /// Whether any discount applies.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Serialize for DiscountPercent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for DiscountPercent {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self::clamped)
    }
}

/// Sale-level fields that travel with the cart but belong to no line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutContext {
    /// Customer name, empty when not given.
    pub customer_name: String,

    /// Table label, empty for counter sales.
    pub table_number: String,

    /// Discount applied to the whole sale.
    pub discount: DiscountPercent,

    /// Free-text comments for the sale.
    pub comments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_below_zero() {
        assert_eq!(
            DiscountPercent::clamped(Decimal::from(-5)).points(),
            Decimal::ZERO
        );
    }

    #[test]
    fn clamps_above_hundred() {
        assert_eq!(
            DiscountPercent::clamped(Decimal::from(250)).points(),
            Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn keeps_values_in_range() {
        let discount = DiscountPercent::clamped(Decimal::new(125, 1));

        assert_eq!(discount.points(), Decimal::new(125, 1));
        assert_eq!(discount.fraction() * Decimal::from(200), Decimal::from(25));
    }

    #[test]
    fn default_context_is_blank() {
        let context = CheckoutContext::default();

        assert!(context.customer_name.is_empty());
        assert!(context.table_number.is_empty());
        assert!(context.comments.is_empty());
        assert!(context.discount.is_zero());
    }
}
