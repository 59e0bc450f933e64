//! End-to-end sale flow against mocked backend services.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use testresult::TestResult;

use caja::prelude::*;
use caja_app::{
    backend::BackendError,
    domain::{
        catalog::{Catalog, MockCatalogService},
        sales::MockCheckoutGateway,
        stock::MockStockValidator,
    },
    engine::{AddOutcome, CartEngine, CheckoutError},
};

fn catalog_service() -> MockCatalogService {
    let mut service = MockCatalogService::new();

    service.expect_list_products().return_once(|| {
        Ok(vec![Product {
            id: CatalogId::new(1),
            name: "Lomo".to_string(),
            description: None,
            price: Some(Decimal::from(20)),
            stock: Some(Decimal::from(8)),
        }])
    });

    service.expect_list_recipes().return_once(|| {
        Ok(vec![Recipe {
            id: CatalogId::new(2),
            name: "Ceviche".to_string(),
            description: None,
            sale_price: Some(Decimal::from(15)),
        }])
    });

    service
}

fn stock_service() -> MockStockValidator {
    let mut stock = MockStockValidator::new();

    stock.expect_validate_stock().returning(|check| {
        Ok(StockReport {
            available: check.kind == LineKind::Product,
            shortfalls: if check.kind == LineKind::Recipe {
                vec![Shortfall {
                    name: "Reineta".to_string(),
                    available: Decimal::new(2, 1),
                    required: Decimal::new(3, 1),
                    unit: Some("kg".to_string()),
                }]
            } else {
                Vec::new()
            },
        })
    });

    stock
}

#[tokio::test]
async fn order_is_priced_submitted_and_cleared() -> TestResult {
    let catalog = Catalog::fetch(&catalog_service()).await?;

    let submitted = Arc::new(Mutex::new(None));
    let captured = Arc::clone(&submitted);

    let mut checkout = MockCheckoutGateway::new();

    checkout.expect_create_sale().once().returning(move |request| {
        let json = serde_json::to_value(&request).map_err(|error| {
            BackendError::UnexpectedResponse(error.to_string())
        })?;

        if let Ok(mut slot) = captured.lock() {
            *slot = Some(json);
        }

        Ok(SaleConfirmation {
            sale_id: Some(SaleId::new(77)),
            subtotal: Some(Decimal::from(55)),
            total: Some(Decimal::new(6386, 2)),
            kitchen_ticket_id: Some(5),
            cashier_ticket_id: Some(6),
            ..SaleConfirmation::default()
        })
    });

    let mut engine = CartEngine::new(Arc::new(stock_service()), Arc::new(checkout));

    let steak = catalog
        .item(LineKind::Product, CatalogId::new(1))?
        .ok_or("steak missing from catalog")?;
    let ceviche = catalog
        .item(LineKind::Recipe, CatalogId::new(2))?
        .ok_or("ceviche missing from catalog")?;

    let AddOutcome::Added(steak_line) = engine.add_item(&steak, |_| false).await else {
        return Err("in-stock product must be added without confirmation".into());
    };

    let mut prompted = Vec::new();
    let ceviche_outcome = engine
        .add_item(&ceviche, |advisory| {
            prompted.push(advisory.to_string());
            true
        })
        .await;

    assert!(matches!(ceviche_outcome, AddOutcome::Added(_)));
    assert_eq!(prompted.len(), 1);
    assert!(prompted.iter().all(|text| text.contains("Reineta")));

    engine.update_quantity(steak_line, 2)?;
    engine.update_note(steak_line, "a punto")?;
    engine.set_customer_name("Juan");
    engine.set_table_number("5");
    engine.set_discount_percent(Decimal::TEN);
    engine.set_comments("Cliente VIP");

    assert_eq!(engine.totals().total, Decimal::new(6386, 2));

    let receipt = engine.submit_checkout().await?;

    assert_eq!(receipt.sale_id(), Some(SaleId::new(77)));
    assert_eq!(receipt.preview.total, Decimal::new(6386, 2));
    assert!(engine.cart().is_empty());

    let payload = submitted
        .lock()
        .map_err(|error| error.to_string())?
        .take()
        .ok_or("no payload captured")?;

    assert_eq!(
        payload,
        serde_json::json!({
            "items": [
                {
                    "tipo": "producto",
                    "id": 1,
                    "cantidad": 2,
                    "precio_unitario": 20.0,
                    "observaciones": "a punto"
                },
                {
                    "tipo": "receta",
                    "id": 2,
                    "cantidad": 1,
                    "precio_unitario": 15.0,
                    "observaciones": ""
                }
            ],
            "cliente_nombre": "Juan",
            "numero_mesa": "5",
            "descuento": 10.0,
            "comentarios": "Cliente VIP"
        })
    );

    Ok(())
}

#[tokio::test]
async fn failed_submission_can_be_retried() -> TestResult {
    let mut checkout = MockCheckoutGateway::new();
    let mut calls = 0;

    checkout.expect_create_sale().times(2).returning(move |_| {
        calls += 1;

        if calls == 1 {
            Err(BackendError::UnexpectedResponse("connection reset".to_string()))
        } else {
            Ok(SaleConfirmation {
                sale_id: Some(SaleId::new(78)),
                ..SaleConfirmation::default()
            })
        }
    });

    let mut engine = CartEngine::new(Arc::new(stock_service()), Arc::new(checkout));
    let steak = CatalogItem::new(LineKind::Product, CatalogId::new(1), "Lomo", Decimal::from(20));

    engine.add_item(&steak, |_| true).await;
    engine.set_customer_name("Ana");

    let first = engine.submit_checkout().await;

    assert!(matches!(first, Err(CheckoutError::Network(_))));
    assert_eq!(engine.cart().len(), 1);
    assert_eq!(engine.cart().context().customer_name, "Ana");

    let second = engine.submit_checkout().await?;

    assert_eq!(second.sale_id(), Some(SaleId::new(78)));
    assert!(engine.cart().is_empty());

    Ok(())
}
