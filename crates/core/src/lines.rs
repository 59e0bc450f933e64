//! Cart Lines

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    catalog::{CatalogId, CatalogItem},
    pricing::round_to_cent,
};

/// What a cart line refers to, and therefore how the backend fulfils it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// A stock-tracked product, decremented directly.
    #[serde(rename = "producto", alias = "product")]
    Product,

    /// A recipe, exploded into its ingredients by the backend.
    #[serde(rename = "receta", alias = "recipe")]
    Recipe,
}

impl LineKind {
    /// Name used for this kind on the wire.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            LineKind::Product => "producto",
            LineKind::Recipe => "receta",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Identifies one entry in the cart.
///
/// Distinct from the catalog id: the same catalog item may sit in the cart
/// several times as independent lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(Uuid);

impl LineId {
    pub(crate) fn mint() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One entry in the cart.
///
/// Name and price are snapshots taken when the line was added; later catalog
/// changes do not reach lines already in the cart.
#[derive(Clone, Debug, PartialEq)]
pub struct CartLine {
    id: LineId,
    kind: LineKind,
    catalog_id: CatalogId,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    note: String,
}

impl CartLine {
    /// Creates a fresh line for a catalog item: quantity one, no note.
    #[must_use]
    pub fn from_item(item: &CatalogItem) -> Self {
        Self {
            id: LineId::mint(),
            kind: item.kind(),
            catalog_id: item.id(),
            name: item.name().to_string(),
            unit_price: item.price(),
            quantity: 1,
            note: String::new(),
        }
    }

    /// Line identifier.
    #[must_use]
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Product or recipe.
    #[must_use]
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Referenced catalog entry.
    #[must_use]
    pub fn catalog_id(&self) -> CatalogId {
        self.catalog_id
    }

    /// Display name captured at add time.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price captured at add time.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units, always at least one.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Kitchen annotation.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Unit price times quantity, unrounded. Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn extended_price(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Line total rounded to the cent, for display.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round_to_cent(self.extended_price())
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        debug_assert!(quantity >= 1, "stored quantities are never zero");

        self.quantity = quantity;
    }

    pub(crate) fn set_note(&mut self, note: String) {
        self.note = note;
    }
}
