//! Tickets

pub mod models;
pub mod service;

pub use models::{Ticket, TicketId, TicketKind};
pub use service::*;
