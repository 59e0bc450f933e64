//! Sales

pub mod service;

pub use service::*;
