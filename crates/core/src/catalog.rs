//! Catalog
//!
//! Products and recipes as the backend lists them. The cart never fetches
//! these itself; callers hand over entries they already hold.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lines::LineKind;

/// Backend identifier of a product or recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(u64);

impl CatalogId {
    /// Wraps a raw backend id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw backend id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while turning catalog records into sellable items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The record carries no price, so it cannot be sold.
    #[error("{kind} {id} has no price")]
    MissingPrice {
        /// Product or recipe.
        kind: LineKind,

        /// Offending record.
        id: CatalogId,
    },
}

/// Stock-tracked product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: CatalogId,

    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Free-text description.
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Sale price.
    #[serde(rename = "precio", default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,

    /// Units on hand, informational only.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub stock: Option<Decimal>,
}

/// Recipe record; sold by the portion and exploded into ingredients server-side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe id.
    pub id: CatalogId,

    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Free-text description.
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Sale price of one portion.
    #[serde(
        rename = "precio_venta",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub sale_price: Option<Decimal>,
}

/// A sellable catalog entry with its price resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    kind: LineKind,
    id: CatalogId,
    name: String,
    price: Decimal,
}

impl CatalogItem {
    /// Creates an item from already-resolved parts.
    pub fn new(kind: LineKind, id: CatalogId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
            price,
        }
    }

    /// Product or recipe.
    #[must_use]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Catalog id.
    #[must_use]
    pub fn id(&self) -> CatalogId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl TryFrom<&Product> for CatalogItem {
    type Error = CatalogError;

    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        let price = product.price.ok_or(CatalogError::MissingPrice {
            kind: LineKind::Product,
            id: product.id,
        })?;

        Ok(Self::new(LineKind::Product, product.id, &product.name, price))
    }
}

impl TryFrom<&Recipe> for CatalogItem {
    type Error = CatalogError;

    fn try_from(recipe: &Recipe) -> Result<Self, Self::Error> {
        let price = recipe.sale_price.ok_or(CatalogError::MissingPrice {
            kind: LineKind::Recipe,
            id: recipe.id,
        })?;

        Ok(Self::new(LineKind::Recipe, recipe.id, &recipe.name, price))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn product_uses_precio() -> TestResult {
        let product: Product = serde_json::from_str(
            r#"{"id": 3, "nombre": "Agua", "precio": 1.5, "stock": 12, "costo": 0.4}"#,
        )?;

        let item = CatalogItem::try_from(&product)?;

        assert_eq!(item.kind(), LineKind::Product);
        assert_eq!(item.id(), CatalogId::new(3));
        assert_eq!(item.name(), "Agua");
        assert_eq!(item.price(), Decimal::new(15, 1));

        Ok(())
    }

    #[test]
    fn recipe_uses_precio_venta() -> TestResult {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 9, "nombre": "Lomo a lo pobre", "precio_venta": 12900, "rendimiento_porciones": 1}"#,
        )?;

        let item = CatalogItem::try_from(&recipe)?;

        assert_eq!(item.kind(), LineKind::Recipe);
        assert_eq!(item.price(), Decimal::from(12_900));

        Ok(())
    }

    #[test]
    fn missing_price_is_rejected() -> TestResult {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 2, "nombre": "Borrador"}"#)?;

        assert_eq!(
            CatalogItem::try_from(&recipe),
            Err(CatalogError::MissingPrice {
                kind: LineKind::Recipe,
                id: CatalogId::new(2),
            })
        );

        Ok(())
    }
}
