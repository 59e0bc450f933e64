//! Stock

pub mod service;

pub use service::*;
