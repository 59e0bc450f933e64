//! Checkout payloads
//!
//! Request and confirmation shapes of the backend's sale endpoint. Field
//! names follow the backend's wire format.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::CatalogId,
    context::DiscountPercent,
    lines::{CartLine, LineKind},
};

/// One sold line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutItem {
    /// Product or recipe.
    #[serde(rename = "tipo")]
    pub kind: LineKind,

    /// Catalog id of the product or recipe.
    pub id: CatalogId,

    /// Units sold.
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Price per unit as shown to the customer.
    #[serde(rename = "precio_unitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,

    /// Kitchen annotation.
    #[serde(rename = "observaciones")]
    pub note: String,
}

impl From<&CartLine> for CheckoutItem {
    fn from(line: &CartLine) -> Self {
        Self {
            kind: line.kind(),
            id: line.catalog_id(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            note: line.note().to_string(),
        }
    }
}

/// Sale submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckoutRequest {
    /// Lines in cart order.
    pub items: Vec<CheckoutItem>,

    /// Customer name.
    #[serde(rename = "cliente_nombre")]
    pub customer_name: String,

    /// Table label.
    #[serde(rename = "numero_mesa")]
    pub table_number: String,

    /// Discount in percent points.
    #[serde(rename = "descuento")]
    pub discount: DiscountPercent,

    /// Sale comments.
    #[serde(rename = "comentarios")]
    pub comments: String,
}

/// Identifier the backend assigned to a recorded sale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(u64);

impl SaleId {
    /// Wraps a raw sale id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw sale id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the backend echoes back for a recorded sale.
///
/// Amounts are the backend's authoritative figures and may differ from the
/// local preview.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SaleConfirmation {
    /// Recorded sale.
    #[serde(rename = "venta_id")]
    pub sale_id: Option<SaleId>,

    /// Customer name as stored.
    #[serde(rename = "cliente", default)]
    pub customer_name: Option<String>,

    /// Table label as stored.
    #[serde(rename = "mesa", default)]
    pub table_number: Option<String>,

    /// Subtotal before discount.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,

    /// Discount amount.
    #[serde(rename = "descuento", default, with = "rust_decimal::serde::float_option")]
    pub discount_amount: Option<Decimal>,

    /// Tax amount.
    #[serde(rename = "iva", default, with = "rust_decimal::serde::float_option")]
    pub tax: Option<Decimal>,

    /// Tip amount.
    #[serde(rename = "propina", default, with = "rust_decimal::serde::float_option")]
    pub tip: Option<Decimal>,

    /// Amount charged.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,

    /// Number of lines recorded.
    #[serde(rename = "items", default)]
    pub item_count: Option<u32>,

    /// Ingredient quantities consumed by recipe lines, keyed by ingredient id.
    #[serde(rename = "explosion_detalles", default)]
    pub ingredient_usage: BTreeMap<String, Decimal>,

    /// Kitchen ticket generated for the sale.
    #[serde(rename = "comanda_cocina_id", default)]
    pub kitchen_ticket_id: Option<u64>,

    /// Cashier ticket generated for the sale.
    #[serde(rename = "comanda_caja_id", default)]
    pub cashier_ticket_id: Option<u64>,
}
