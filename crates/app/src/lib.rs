//! Cart engine, backend services and session handling for the Caja
//! point-of-sale terminal.

pub mod backend;
pub mod config;
pub mod context;
pub mod domain;
pub mod engine;
pub mod observability;
pub mod session;
