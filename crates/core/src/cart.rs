//! Cart

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    catalog::CatalogItem,
    checkout::{CheckoutItem, CheckoutRequest},
    context::{CheckoutContext, DiscountPercent},
    lines::{CartLine, LineId},
    pricing::{Totals, compute_totals},
};

/// Errors raised by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Checkout was attempted with no lines in the cart.
    #[error("the cart is empty")]
    Empty,

    /// No line with this id is in the cart.
    #[error("line {0} is not in the cart")]
    LineNotFound(LineId),
}

/// Result of a quantity update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantityUpdate {
    /// The line now has the requested quantity.
    Updated(u32),

    /// The requested quantity was zero or less, so the line was removed.
    Removed,
}

/// Lines waiting to be sold plus the sale context.
///
/// Lines keep insertion order, which matters for display only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    context: CheckoutContext,
    revision: u64,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new line for `item`, even when the item is already in the cart.
    pub fn append(&mut self, item: &CatalogItem) -> LineId {
        let line = CartLine::from_item(item);
        let id = line.id();

        self.lines.push(line);
        self.bump();

        id
    }

    /// Sets a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this id.
    pub fn update_quantity(
        &mut self,
        id: LineId,
        quantity: i64,
    ) -> Result<QuantityUpdate, CartError> {
        if quantity <= 0 {
            return self.remove_or_not_found(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let line = self.line_mut(id)?;
        line.set_quantity(quantity);
        self.bump();

        Ok(QuantityUpdate::Updated(quantity))
    }

    /// Replaces a line's note. Any text is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line has this id.
    pub fn update_note(&mut self, id: LineId, note: impl Into<String>) -> Result<(), CartError> {
        self.line_mut(id)?.set_note(note.into());

        Ok(())
    }

    /// Removes a line, returning it. Removing an absent line does nothing.
    pub fn remove_line(&mut self, id: LineId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id() == id)?;
        let line = self.lines.remove(index);

        self.bump();

        Some(line)
    }

    /// Sets the sale discount, clamped into `[0, 100]`.
    pub fn set_discount_percent(&mut self, points: Decimal) -> DiscountPercent {
        self.context.discount = DiscountPercent::clamped(points);
        self.context.discount
    }

    /// Sets the customer name.
    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.context.customer_name = name.into();
    }

    /// Sets the table label.
    pub fn set_table_number(&mut self, table: impl Into<String>) {
        self.context.table_number = table.into();
    }

    /// Sets the sale comments.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.context.comments = comments.into();
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.lines, self.context.discount)
    }

    /// Builds the sale request for the backend.
    ///
    /// Carries the raw discount percent rather than totals; the backend
    /// prices the sale authoritatively.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] if there is nothing to sell.
    pub fn checkout_request(&self) -> Result<CheckoutRequest, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }

        Ok(CheckoutRequest {
            items: self.lines.iter().map(CheckoutItem::from).collect(),
            customer_name: self.context.customer_name.clone(),
            table_number: self.context.table_number.clone(),
            discount: self.context.discount,
            comments: self.context.comments.clone(),
        })
    }

    /// Drops every line and resets the context to defaults.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.context = CheckoutContext::default();
        self.bump();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line.
    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Sale context.
    #[must_use]
    pub fn context(&self) -> &CheckoutContext {
        &self.context
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Counter bumped by every change to the set of lines or their quantities.
    ///
    /// Note and context edits leave it alone.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut CartLine, CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or(CartError::LineNotFound(id))
    }

    fn remove_or_not_found(&mut self, id: LineId) -> Result<QuantityUpdate, CartError> {
        self.remove_line(id)
            .map(|_line| QuantityUpdate::Removed)
            .ok_or(CartError::LineNotFound(id))
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{catalog::CatalogId, lines::LineKind};

    use super::*;

    fn burger() -> CatalogItem {
        CatalogItem::new(LineKind::Recipe, CatalogId::new(7), "Burger", Decimal::from(8))
    }

    fn cola() -> CatalogItem {
        CatalogItem::new(LineKind::Product, CatalogId::new(2), "Cola", Decimal::new(250, 2))
    }

    #[test]
    fn appending_the_same_item_twice_makes_two_lines() {
        let mut cart = Cart::new();

        let first = cart.append(&burger());
        let second = cart.append(&burger());

        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
        assert!(cart.lines().iter().all(|line| line.quantity() == 1));
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = Cart::new();

        cart.append(&cola());
        cart.append(&burger());

        let names: Vec<_> = cart.lines().iter().map(CartLine::name).collect();

        assert_eq!(names, ["Cola", "Burger"]);
    }

    #[test]
    fn update_quantity_sets_the_value() -> TestResult {
        let mut cart = Cart::new();
        let id = cart.append(&cola());

        assert_eq!(cart.update_quantity(id, 4)?, QuantityUpdate::Updated(4));
        assert_eq!(cart.line(id).map(CartLine::quantity), Some(4));

        Ok(())
    }

    #[test]
    fn zero_or_negative_quantity_removes_the_line() -> TestResult {
        let mut cart = Cart::new();
        let zero = cart.append(&cola());
        let negative = cart.append(&burger());

        assert_eq!(cart.update_quantity(zero, 0)?, QuantityUpdate::Removed);
        assert_eq!(cart.update_quantity(negative, -1)?, QuantityUpdate::Removed);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_on_unknown_line_is_not_found() {
        let mut cart = Cart::new();
        let id = cart.append(&cola());
        cart.remove_line(id);

        assert_eq!(cart.update_quantity(id, 3), Err(CartError::LineNotFound(id)));
        assert_eq!(cart.update_quantity(id, 0), Err(CartError::LineNotFound(id)));
    }

    #[test]
    fn remove_line_is_idempotent() {
        let mut cart = Cart::new();
        let id = cart.append(&cola());

        assert!(cart.remove_line(id).is_some());
        assert!(cart.remove_line(id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn update_note_replaces_the_note() -> TestResult {
        let mut cart = Cart::new();
        let id = cart.append(&burger());

        cart.update_note(id, "sin cebolla")?;
        cart.update_note(id, "sin pepinillos")?;

        assert_eq!(cart.line(id).map(CartLine::note), Some("sin pepinillos"));

        Ok(())
    }

    #[test]
    fn discount_is_clamped() {
        let mut cart = Cart::new();

        assert_eq!(cart.set_discount_percent(Decimal::from(140)).points(), Decimal::ONE_HUNDRED);
        assert_eq!(cart.set_discount_percent(Decimal::from(-3)).points(), Decimal::ZERO);
    }

    #[test]
    fn totals_are_idempotent() {
        let mut cart = Cart::new();
        cart.append(&burger());
        cart.append(&cola());
        cart.set_discount_percent(Decimal::new(75, 1));

        assert_eq!(cart.totals(), cart.totals());
    }

    #[test]
    fn checkout_request_on_empty_cart_fails() {
        assert_eq!(Cart::new().checkout_request(), Err(CartError::Empty));
    }

    #[test]
    fn checkout_request_maps_lines_and_context() -> TestResult {
        let mut cart = Cart::new();
        let id = cart.append(&burger());
        cart.append(&cola());
        cart.update_quantity(id, 2)?;
        cart.update_note(id, "bien cocida")?;
        cart.set_customer_name("Ana");
        cart.set_table_number("5");
        cart.set_comments("cumpleaños");
        cart.set_discount_percent(Decimal::TEN);

        let request = cart.checkout_request()?;

        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items.first().map(|item| item.quantity), Some(2));
        assert_eq!(request.items.first().map(|item| item.note.as_str()), Some("bien cocida"));
        assert_eq!(request.customer_name, "Ana");
        assert_eq!(request.table_number, "5");
        assert_eq!(request.comments, "cumpleaños");
        assert_eq!(request.discount.points(), Decimal::TEN);

        Ok(())
    }

    #[test]
    fn clear_resets_lines_and_context() {
        let mut cart = Cart::new();
        cart.append(&burger());
        cart.set_customer_name("Ana");
        cart.set_discount_percent(Decimal::TEN);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.context(), &CheckoutContext::default());
    }

    #[test]
    fn revision_tracks_line_changes_only() -> TestResult {
        let mut cart = Cart::new();
        let start = cart.revision();

        let id = cart.append(&cola());
        let after_add = cart.revision();
        cart.update_note(id, "helada")?;
        cart.set_customer_name("Ana");

        assert!(after_add > start);
        assert_eq!(cart.revision(), after_add);

        cart.update_quantity(id, 3)?;
        assert!(cart.revision() > after_add);

        Ok(())
    }
}
