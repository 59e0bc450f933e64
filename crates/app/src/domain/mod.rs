//! Caja Backend Services

pub mod catalog;
pub mod sales;
pub mod stock;
pub mod tickets;
