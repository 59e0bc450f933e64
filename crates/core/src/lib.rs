//! Caja
//!
//! Cart pricing and checkout composition for a restaurant point of sale:
//! cart lines for products and recipes, derived totals with discount, tax
//! and tip, and the payloads exchanged with the sales backend.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod context;
pub mod lines;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod stock;
pub mod summary;
