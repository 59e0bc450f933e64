//! Cart Engine
//!
//! Owns the cart and coordinates the two backend round trips of a sale: the
//! stock check before an add and the checkout submission. Everything else is
//! a synchronous cart edit.
//!
//! Stock answers are advisory. An add that the backend reports as short, or
//! whose check failed, still goes ahead when the caller confirms it; the
//! backend validates again, authoritatively, at checkout.

use std::{fmt, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use caja::prelude::*;

use crate::{
    backend::BackendError,
    context::AppContext,
    domain::{sales::CheckoutGateway, stock::StockValidator},
};

mod errors;
mod models;

pub use errors::{CheckoutError, EngineError};
pub use models::{AddOutcome, CheckoutReceipt, PendingAdd};

/// Shown when the backend could not be reached during checkout.
const CONNECTION_ERROR: &str = "connection error while processing the sale";

/// Shown when the backend refused a sale without saying why.
const SALE_REJECTED: &str = "the sale could not be processed";

/// Cart plus the services it needs.
#[derive(Clone)]
pub struct CartEngine {
    cart: Cart,
    stock: Arc<dyn StockValidator>,
    checkout: Arc<dyn CheckoutGateway>,
}

impl fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartEngine")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartEngine {
    /// Creates an engine with an empty cart.
    #[must_use]
    pub fn new(stock: Arc<dyn StockValidator>, checkout: Arc<dyn CheckoutGateway>) -> Self {
        Self {
            cart: Cart::new(),
            stock,
            checkout,
        }
    }

    /// Creates an engine using the services of an app context.
    #[must_use]
    pub fn from_context(context: &AppContext) -> Self {
        Self::new(Arc::clone(&context.stock), Arc::clone(&context.checkout))
    }

    /// The cart as it is now.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Checks stock for one unit of `item`.
    ///
    /// Never fails and never touches the cart: a failed check becomes
    /// [`StockAdvisory::Unreachable`].
    pub async fn check_stock(&self, item: &CatalogItem) -> PendingAdd {
        let revision = self.cart.revision();
        let check = StockCheck::single(item.kind(), item.id());

        let advisory = match self.stock.validate_stock(check).await {
            Ok(report) => StockAdvisory::from(report),
            Err(source) => {
                warn!(kind = %item.kind(), id = %item.id(), "stock check failed: {source}");

                StockAdvisory::Unreachable(source.to_string())
            }
        };

        if let StockAdvisory::Unavailable(shortfalls) = &advisory {
            info!(
                kind = %item.kind(),
                id = %item.id(),
                missing = shortfalls.len(),
                "item is short of stock"
            );
        }

        PendingAdd {
            item: item.clone(),
            advisory,
            revision,
        }
    }

    /// Appends the checked item as a new line.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StaleStockCheck`] if the cart's lines changed
    /// since the check started; the cart is left untouched.
    pub fn confirm_add(&mut self, pending: PendingAdd) -> Result<LineId, EngineError> {
        if pending.revision != self.cart.revision() {
            warn!(
                checked_at = pending.revision,
                current = self.cart.revision(),
                "discarding stale stock check"
            );

            return Err(EngineError::StaleStockCheck);
        }

        Ok(self.append(&pending.item))
    }

    /// Checks stock and appends the item, asking `decide` first whenever the
    /// check did not come back clean.
    pub async fn add_item(
        &mut self,
        item: &CatalogItem,
        decide: impl FnOnce(&StockAdvisory) -> bool,
    ) -> AddOutcome {
        let pending = self.check_stock(item).await;

        if pending.needs_confirmation() && !decide(pending.advisory()) {
            debug!(kind = %item.kind(), id = %item.id(), "add declined");

            return AddOutcome::Declined;
        }

        AddOutcome::Added(self.append(&pending.item))
    }

    fn append(&mut self, item: &CatalogItem) -> LineId {
        let id = self.cart.append(item);

        debug!(line = %id, kind = %item.kind(), catalog_id = %item.id(), "line added");

        id
    }

    /// Sets a line's quantity; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cart`] for an unknown line.
    pub fn update_quantity(
        &mut self,
        id: LineId,
        quantity: i64,
    ) -> Result<QuantityUpdate, EngineError> {
        Ok(self.cart.update_quantity(id, quantity)?)
    }

    /// Replaces a line's note.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Cart`] for an unknown line.
    pub fn update_note(&mut self, id: LineId, note: impl Into<String>) -> Result<(), EngineError> {
        Ok(self.cart.update_note(id, note)?)
    }

    /// Removes a line if present.
    pub fn remove_line(&mut self, id: LineId) -> Option<CartLine> {
        self.cart.remove_line(id)
    }

    /// Sets the sale discount, clamped into `[0, 100]`.
    pub fn set_discount_percent(&mut self, points: Decimal) -> DiscountPercent {
        self.cart.set_discount_percent(points)
    }

    /// Sets the customer name.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.cart.set_customer_name(name);
    }

    /// Sets the table label.
    pub fn set_table_number(&mut self, table: impl Into<String>) {
        self.cart.set_table_number(table);
    }

    /// Sets the sale comments.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.cart.set_comments(comments);
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.cart.totals()
    }

    /// Submits the cart as a sale.
    ///
    /// On success the cart and its context are cleared. On failure nothing
    /// changes, so the same cart can be submitted again.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] without calling the backend when
    /// there is nothing to sell, or the backend's reason for refusing.
    pub async fn submit_checkout(&mut self) -> Result<CheckoutReceipt, CheckoutError> {
        let Ok(request) = self.cart.checkout_request() else {
            return Err(CheckoutError::EmptyCart);
        };

        let preview = self.cart.totals();
        let line_count = request.items.len();

        info!(lines = line_count, total = %preview.total, "submitting sale");

        match self.checkout.create_sale(request).await {
            Ok(confirmation) => {
                info!(
                    sale_id = ?confirmation.sale_id,
                    total = ?confirmation.total,
                    "sale recorded"
                );

                self.cart.clear();

                Ok(CheckoutReceipt {
                    confirmation,
                    preview,
                    line_count,
                    confirmed_at: Timestamp::now(),
                })
            }
            Err(source) => {
                error!("sale failed: {source}");

                Err(checkout_error(source))
            }
        }
    }

    /// Empties the cart and resets its context.
    pub fn clear(&mut self) {
        self.cart.clear();
    }
}

impl OrderTarget for CartEngine {
    type Error = EngineError;

    fn set_line_quantity(&mut self, line: LineId, quantity: i64) -> Result<(), EngineError> {
        self.update_quantity(line, quantity).map(|_update| ())
    }

    fn set_line_note(&mut self, line: LineId, note: String) -> Result<(), EngineError> {
        self.update_note(line, note)
    }

    fn set_context(&mut self, context: CheckoutContext) {
        self.cart.set_context(context);
    }
}

fn checkout_error(source: BackendError) -> CheckoutError {
    match source {
        BackendError::Api { message, .. } if message.trim().is_empty() => {
            CheckoutError::Rejected(SALE_REJECTED.to_string())
        }
        BackendError::Api { message, .. } => CheckoutError::Rejected(message),
        BackendError::Unauthorized => CheckoutError::Unauthorized,
        BackendError::Http(_) | BackendError::UnexpectedResponse(_) => {
            CheckoutError::Network(CONNECTION_ERROR.to_string())
        }
    }
}
