//! Stock checks
//!
//! Shapes exchanged with the backend's stock validation endpoint, and the
//! advisory the cart engine derives from them.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{catalog::CatalogId, lines::LineKind};

/// Asks whether `quantity` units of a product or recipe can be made.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StockCheck {
    /// Product or recipe.
    #[serde(rename = "tipo")]
    pub kind: LineKind,

    /// Catalog id.
    pub id: CatalogId,

    /// Units wanted.
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl StockCheck {
    /// A check for a single unit, as made when adding to the cart.
    #[must_use]
    pub fn single(kind: LineKind, id: CatalogId) -> Self {
        Self {
            kind,
            id,
            quantity: 1,
        }
    }
}

/// One ingredient or product the backend is short of.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Ingredient or product name.
    #[serde(rename = "nombre")]
    pub name: String,

    /// Quantity on hand.
    #[serde(rename = "stock_actual", with = "rust_decimal::serde::float")]
    pub available: Decimal,

    /// Quantity the request needs.
    #[serde(rename = "requerido", with = "rust_decimal::serde::float")]
    pub required: Decimal,

    /// Unit of measure, if any.
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (stock: {} / required: {}",
            self.name,
            self.available.normalize(),
            self.required.normalize()
        )?;

        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => write!(f, " {unit})"),
            _ => f.write_str(")"),
        }
    }
}

/// Backend answer to a [`StockCheck`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    /// Whether everything needed is on hand.
    #[serde(rename = "disponible")]
    pub available: bool,

    /// What is missing when not available.
    #[serde(rename = "faltantes", default)]
    pub shortfalls: Vec<Shortfall>,
}

/// What the cart engine tells its caller before adding an item.
///
/// Only [`StockAdvisory::Available`] lets an add go ahead without asking;
/// both other variants leave the decision to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StockAdvisory {
    /// Everything needed is on hand.
    Available,

    /// The backend reports shortages.
    Unavailable(Vec<Shortfall>),

    /// The check itself failed; availability is unknown.
    Unreachable(String),
}

impl StockAdvisory {
    /// Whether the caller must confirm before the add proceeds.
    #[must_use]
    pub fn needs_confirmation(&self) -> bool {
        !matches!(self, StockAdvisory::Available)
    }
}

impl From<StockReport> for StockAdvisory {
    fn from(report: StockReport) -> Self {
        if report.available {
            StockAdvisory::Available
        } else {
            StockAdvisory::Unavailable(report.shortfalls)
        }
    }
}

impl fmt::Display for StockAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockAdvisory::Available => f.write_str("in stock"),
            StockAdvisory::Unavailable(shortfalls) => {
                f.write_str("missing ingredients:")?;

                for shortfall in shortfalls {
                    write!(f, "\n  {shortfall}")?;
                }

                Ok(())
            }
            StockAdvisory::Unreachable(reason) => {
                write!(f, "stock could not be verified: {reason}")
            }
        }
    }
}
