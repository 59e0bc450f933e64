//! Catalog

pub mod models;
pub mod service;

pub use models::Catalog;
pub use service::*;
