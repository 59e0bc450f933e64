//! Ticket models.

use std::fmt;

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use caja::prelude::*;

/// Which copy of a sale's ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum TicketKind {
    /// Kitchen order: lines, notes and recipe ingredients.
    #[serde(rename = "cocina")]
    Kitchen,

    /// Cashier copy with the amounts.
    #[serde(rename = "caja")]
    Cashier,
}

impl TicketKind {
    /// Path segment used for this kind.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            TicketKind::Kitchen => "cocina",
            TicketKind::Cashier => "caja",
        }
    }
}

impl fmt::Display for TicketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Backend identifier of a generated ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u64);

impl TicketId {
    /// Wraps a raw ticket id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rendered ticket ("comanda").
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Ticket {
    /// Ticket id.
    pub id: TicketId,

    /// Sale the ticket belongs to.
    #[serde(rename = "venta_id")]
    pub sale_id: SaleId,

    /// Kitchen or cashier copy.
    #[serde(rename = "tipo")]
    pub kind: TicketKind,

    /// HTML rendering, for browsers.
    #[serde(default)]
    pub html: String,

    /// Plain-text rendering, for receipt printers.
    #[serde(rename = "texto", default)]
    pub text: String,

    /// Whether it has been printed.
    #[serde(rename = "impresa", default)]
    pub printed: bool,

    /// When the backend generated it, in backend local time.
    #[serde(default)]
    pub created_at: Option<DateTime>,
}
