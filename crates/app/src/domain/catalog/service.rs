//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::RequestBuilder;

use caja::prelude::*;

use crate::backend::{BackendClient, BackendError};

impl BackendClient {
    pub(crate) fn products_request(&self) -> RequestBuilder {
        self.get("productos")
    }

    pub(crate) fn recipes_request(&self) -> RequestBuilder {
        self.get("recetas")
    }
}

#[async_trait]
impl CatalogService for BackendClient {
    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        self.send_listing(self.products_request()).await
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, BackendError> {
        self.send_listing(self.recipes_request()).await
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Lists sellable products.
    async fn list_products(&self) -> Result<Vec<Product>, BackendError>;

    /// Lists recipes.
    async fn list_recipes(&self) -> Result<Vec<Recipe>, BackendError>;
}
