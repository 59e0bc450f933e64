//! Sales service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::RequestBuilder;

use caja::prelude::*;

use crate::backend::{BackendClient, BackendError};

impl BackendClient {
    pub(crate) fn create_sale_request(&self, request: &CheckoutRequest) -> RequestBuilder {
        self.post("ventas/crear-con-explosion").json(request)
    }
}

#[async_trait]
impl CheckoutGateway for BackendClient {
    async fn create_sale(&self, request: CheckoutRequest) -> Result<SaleConfirmation, BackendError> {
        let request = self.create_sale_request(&request);

        self.send_enveloped(request).await?.into_data()
    }
}

#[automock]
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Records a sale: validates stock, explodes recipes, decrements
    /// inventory and generates the kitchen and cashier tickets.
    async fn create_sale(&self, request: CheckoutRequest) -> Result<SaleConfirmation, BackendError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Method;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::backend::BackendConfig;

    use super::*;

    #[test]
    fn sale_is_posted_as_json() -> TestResult {
        let client = BackendClient::new(BackendConfig {
            api_url: "http://h/api/".to_string(),
            token: Some("secret".to_string()),
            timeout: Duration::from_secs(5),
        })?;

        let mut cart = Cart::new();
        cart.append(&CatalogItem::new(
            LineKind::Product,
            CatalogId::new(1),
            "Lomo",
            Decimal::from(20),
        ));
        cart.set_table_number("5");

        let request = client.create_sale_request(&cart.checkout_request()?).build()?;

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "http://h/api/ventas/crear-con-explosion");

        let body = request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .ok_or("sale request has no body")?;
        let json: serde_json::Value = serde_json::from_slice(body)?;

        assert_eq!(json["numero_mesa"], "5");
        assert_eq!(json["items"][0]["tipo"], "producto");
        assert_eq!(json["items"][0]["cantidad"], 1);

        Ok(())
    }
}
