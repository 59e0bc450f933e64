//! App Context

use std::sync::Arc;

use crate::{
    backend::{BackendClient, BackendConfig, BackendError},
    domain::{
        catalog::CatalogService, sales::CheckoutGateway, stock::StockValidator,
        tickets::TicketService,
    },
};

/// Backend services shared by the engine and the command line.
#[derive(Clone)]
pub struct AppContext {
    pub stock: Arc<dyn StockValidator>,
    pub checkout: Arc<dyn CheckoutGateway>,
    pub catalog: Arc<dyn CatalogService>,
    pub tickets: Arc<dyn TicketService>,
}

impl AppContext {
    /// Build application context backed by the HTTP backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_backend(config: BackendConfig) -> Result<Self, BackendError> {
        let client = Arc::new(BackendClient::new(config)?);

        Ok(Self {
            stock: client.clone(),
            checkout: client.clone(),
            catalog: client.clone(),
            tickets: client,
        })
    }
}
