//! Tickets service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::RequestBuilder;
use serde::de::IgnoredAny;

use caja::prelude::*;

use crate::{
    backend::{BackendClient, BackendError},
    domain::tickets::models::{Ticket, TicketId, TicketKind},
};

impl BackendClient {
    pub(crate) fn ticket_request(&self, sale: SaleId, kind: TicketKind) -> RequestBuilder {
        self.get(&format!("ventas/{sale}/comanda/{kind}"))
    }

    pub(crate) fn mark_printed_request(&self, ticket: TicketId) -> RequestBuilder {
        self.put(&format!("ventas/comanda/{ticket}/marcar-impresa"))
    }
}

#[async_trait]
impl TicketService for BackendClient {
    async fn get_ticket(&self, sale: SaleId, kind: TicketKind) -> Result<Ticket, BackendError> {
        let request = self.ticket_request(sale, kind);

        self.send_enveloped(request).await?.into_data()
    }

    async fn mark_printed(&self, ticket: TicketId) -> Result<(), BackendError> {
        let request = self.mark_printed_request(ticket);

        self.send_enveloped::<IgnoredAny>(request).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Fetches a sale's kitchen or cashier ticket, generating it if needed.
    async fn get_ticket(&self, sale: SaleId, kind: TicketKind) -> Result<Ticket, BackendError>;

    /// Flags a ticket as printed.
    async fn mark_printed(&self, ticket: TicketId) -> Result<(), BackendError>;
}
