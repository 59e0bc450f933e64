//! Cart engine errors.

use thiserror::Error;

use caja::prelude::*;

/// Errors from cart edits made through the engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The cart changed while the stock check was in flight; check again.
    #[error("the cart changed while stock was being checked")]
    StaleStockCheck,

    /// The cart refused the edit.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Why a sale was not recorded. The cart is left as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to sell.
    #[error("the cart is empty")]
    EmptyCart,

    /// The backend refused the sale, e.g. for missing stock.
    #[error("{0}")]
    Rejected(String),

    /// The session token was refused.
    #[error("session expired or invalid, log in again")]
    Unauthorized,

    /// The backend could not be reached or answered unintelligibly.
    #[error("{0}")]
    Network(String),
}
