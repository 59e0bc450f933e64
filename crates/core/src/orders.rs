//! Order files
//!
//! YAML description of a sale, used to drive the cart from the command line.
//!
//! ```yaml
//! customer: Juan
//! table: "5"
//! discount: 10
//! comments: Cliente VIP
//! items:
//!   - kind: recipe
//!     id: 5
//!     quantity: 2
//!     note: sin picante
//!   - kind: product
//!     id: 3
//!     name: Agua
//!     price: 1.50
//! ```

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::{CatalogId, CatalogItem},
    context::{CheckoutContext, DiscountPercent},
    lines::{LineId, LineKind},
};

/// Order file errors.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The file could not be read.
    #[error("failed to read order file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid order.
    #[error("failed to parse order: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// An item lacks the name or price needed to price it offline.
    #[error("{kind} {id} needs a name and a price to be quoted offline")]
    Incomplete {
        /// Product or recipe.
        kind: LineKind,

        /// Catalog id of the item.
        id: CatalogId,
    },

    /// An item is not in the catalog.
    #[error("{kind} {id} is not in the catalog")]
    UnknownItem {
        /// Product or recipe.
        kind: LineKind,

        /// Catalog id of the item.
        id: CatalogId,
    },

    /// Applying the item to the cart failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Anything holding a cart that order entries can be written to.
pub trait OrderTarget {
    /// Error for an edit the target refuses, such as an unknown line.
    type Error;

    /// Sets a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not in the cart.
    fn set_line_quantity(&mut self, line: LineId, quantity: i64) -> Result<(), Self::Error>;

    /// Replaces a line's note.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is not in the cart.
    fn set_line_note(&mut self, line: LineId, note: String) -> Result<(), Self::Error>;

    /// Replaces the sale-level fields.
    fn set_context(&mut self, context: CheckoutContext);
}

impl OrderTarget for Cart {
    type Error = CartError;

    fn set_line_quantity(&mut self, line: LineId, quantity: i64) -> Result<(), CartError> {
        self.update_quantity(line, quantity).map(|_update| ())
    }

    fn set_line_note(&mut self, line: LineId, note: String) -> Result<(), CartError> {
        self.update_note(line, note)
    }

    fn set_context(&mut self, context: CheckoutContext) {
        self.set_customer_name(context.customer_name);
        self.set_table_number(context.table_number);
        self.set_discount_percent(context.discount.points());
        self.set_comments(context.comments);
    }
}

/// One requested line.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OrderItem {
    /// Product or recipe.
    pub kind: LineKind,

    /// Catalog id.
    pub id: CatalogId,

    /// Units wanted.
    #[serde(default = "one")]
    pub quantity: u32,

    /// Kitchen note.
    #[serde(default)]
    pub note: String,

    /// Name, only needed for offline quotes.
    #[serde(default)]
    pub name: Option<String>,

    /// Unit price, only needed for offline quotes.
    #[serde(default)]
    pub price: Option<Decimal>,
}

fn one() -> u32 {
    1
}

impl OrderItem {
    /// The catalog item described inline by this entry.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Incomplete`] if name or price is missing.
    pub fn inline_item(&self) -> Result<CatalogItem, OrderError> {
        match (&self.name, self.price) {
            (Some(name), Some(price)) => Ok(CatalogItem::new(self.kind, self.id, name, price)),
            _ => Err(OrderError::Incomplete {
                kind: self.kind,
                id: self.id,
            }),
        }
    }

    /// Sets quantity and note on a line freshly added for this entry.
    ///
    /// # Errors
    ///
    /// Returns the target's error if the line is not in its cart.
    pub fn apply_to_line<T: OrderTarget + ?Sized>(
        &self,
        target: &mut T,
        line: LineId,
    ) -> Result<(), T::Error> {
        if self.quantity != 1 {
            target.set_line_quantity(line, i64::from(self.quantity))?;
        }

        if !self.note.is_empty() {
            target.set_line_note(line, self.note.clone())?;
        }

        Ok(())
    }
}

/// A whole sale.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct OrderFile {
    /// Customer name.
    #[serde(default)]
    pub customer: String,

    /// Table label.
    #[serde(default)]
    pub table: String,

    /// Discount in percent points.
    #[serde(default)]
    pub discount: Decimal,

    /// Sale comments.
    #[serde(default)]
    pub comments: String,

    /// Requested lines, in order.
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderFile {
    /// Loads an order from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, OrderError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parses an order from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Yaml`] if the text is not a valid order.
    pub fn from_yaml(yaml: &str) -> Result<Self, OrderError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Sale-level fields, with the discount clamped.
    #[must_use]
    pub fn context(&self) -> CheckoutContext {
        CheckoutContext {
            customer_name: self.customer.clone(),
            table_number: self.table.clone(),
            discount: DiscountPercent::clamped(self.discount),
            comments: self.comments.clone(),
        }
    }

    /// Copies the sale-level fields onto the target.
    pub fn apply_context<T: OrderTarget + ?Sized>(&self, target: &mut T) {
        target.set_context(self.context());
    }

    /// Builds a cart from inline names and prices, without a catalog or
    /// stock checks.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Incomplete`] for items without name or price.
    pub fn quote(&self) -> Result<Cart, OrderError> {
        let mut cart = Cart::new();

        for item in &self.items {
            let line = cart.append(&item.inline_item()?);
            item.apply_to_line(&mut cart, line)?;
        }

        self.apply_context(&mut cart);

        Ok(cart)
    }
}
