//! Stock validation service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::RequestBuilder;

use caja::prelude::*;

use crate::backend::{BackendClient, BackendError};

impl BackendClient {
    pub(crate) fn validate_stock_request(&self, check: &StockCheck) -> RequestBuilder {
        self.get("ventas/validar-stock").query(check)
    }
}

#[async_trait]
impl StockValidator for BackendClient {
    async fn validate_stock(&self, check: StockCheck) -> Result<StockReport, BackendError> {
        let request = self.validate_stock_request(&check);

        self.send_enveloped(request).await?.into_data()
    }
}

#[automock]
#[async_trait]
pub trait StockValidator: Send + Sync {
    /// Asks whether the requested units of a product or recipe are on hand.
    async fn validate_stock(&self, check: StockCheck) -> Result<StockReport, BackendError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Method;
    use testresult::TestResult;

    use crate::backend::BackendConfig;

    use super::*;

    #[test]
    fn stock_check_is_a_get_with_query_parameters() -> TestResult {
        let client = BackendClient::new(BackendConfig {
            api_url: "http://h/api".to_string(),
            token: None,
            timeout: Duration::from_secs(5),
        })?;

        let request = client
            .validate_stock_request(&StockCheck::single(LineKind::Recipe, CatalogId::new(5)))
            .build()?;

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.url().as_str(),
            "http://h/api/ventas/validar-stock?tipo=receta&id=5&cantidad=1"
        );

        Ok(())
    }
}
