//! Cart engine models.

use jiff::Timestamp;

use caja::prelude::*;

use crate::domain::tickets::TicketId;

/// A stock-checked item waiting for the caller to confirm or drop it.
///
/// Dropping it declines the add.
#[derive(Clone, Debug, PartialEq)]
#[must_use = "a pending add does nothing unless confirmed"]
pub struct PendingAdd {
    pub(crate) item: CatalogItem,
    pub(crate) advisory: StockAdvisory,
    pub(crate) revision: u64,
}

impl PendingAdd {
    /// The item to be added.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// What the stock check found.
    pub fn advisory(&self) -> &StockAdvisory {
        &self.advisory
    }

    /// Whether the caller must be asked before confirming.
    pub fn needs_confirmation(&self) -> bool {
        self.advisory.needs_confirmation()
    }
}

/// Result of [`CartEngine::add_item`](super::CartEngine::add_item).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added(LineId),

    /// The caller declined after a stock advisory; the cart is unchanged.
    Declined,
}

/// A recorded sale.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutReceipt {
    /// What the backend recorded, with its authoritative amounts.
    pub confirmation: SaleConfirmation,

    /// Totals the terminal showed before submitting.
    pub preview: Totals,

    /// Number of lines submitted.
    pub line_count: usize,

    /// When the sale was confirmed.
    pub confirmed_at: Timestamp,
}

impl CheckoutReceipt {
    /// Backend sale id.
    pub fn sale_id(&self) -> Option<SaleId> {
        self.confirmation.sale_id
    }

    /// Kitchen ticket generated for the sale.
    pub fn kitchen_ticket(&self) -> Option<TicketId> {
        self.confirmation.kitchen_ticket_id.map(TicketId::new)
    }

    /// Cashier ticket generated for the sale.
    pub fn cashier_ticket(&self) -> Option<TicketId> {
        self.confirmation.cashier_ticket_id.map(TicketId::new)
    }

    /// Amount charged: the backend's figure, else the local preview.
    pub fn total(&self) -> rust_decimal::Decimal {
        self.confirmation.total.unwrap_or(self.preview.total)
    }
}
