//! Catalog models.

use caja::prelude::*;

use crate::{backend::BackendError, domain::catalog::CatalogService};

/// Products and recipes fetched together, for resolving order items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    /// Products, in backend order.
    pub products: Vec<Product>,

    /// Recipes, in backend order.
    pub recipes: Vec<Recipe>,
}

impl Catalog {
    /// Fetches both listings.
    ///
    /// # Errors
    ///
    /// Returns an error if either listing fails.
    pub async fn fetch(service: &dyn CatalogService) -> Result<Self, BackendError> {
        Ok(Self {
            products: service.list_products().await?,
            recipes: service.list_recipes().await?,
        })
    }

    /// Looks up a sellable item.
    ///
    /// Returns `Ok(None)` when no record has that id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingPrice`] if the record has no price.
    pub fn item(&self, kind: LineKind, id: CatalogId) -> Result<Option<CatalogItem>, CatalogError> {
        match kind {
            LineKind::Product => self
                .products
                .iter()
                .find(|product| product.id == id)
                .map(CatalogItem::try_from)
                .transpose(),
            LineKind::Recipe => self
                .recipes
                .iter()
                .find(|recipe| recipe.id == id)
                .map(CatalogItem::try_from)
                .transpose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::catalog::MockCatalogService;

    use super::*;

    fn product(id: u64, price: Option<Decimal>) -> Product {
        Product {
            id: CatalogId::new(id),
            name: format!("Product {id}"),
            description: None,
            price,
            stock: None,
        }
    }

    fn recipe(id: u64) -> Recipe {
        Recipe {
            id: CatalogId::new(id),
            name: "Ceviche".to_string(),
            description: None,
            sale_price: Some(Decimal::from(15)),
        }
    }

    #[tokio::test]
    async fn fetch_lists_products_and_recipes() -> TestResult {
        let mut service = MockCatalogService::new();

        service
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![product(1, Some(Decimal::ONE))]));
        service
            .expect_list_recipes()
            .once()
            .return_once(|| Ok(vec![recipe(1)]));

        let catalog = Catalog::fetch(&service).await?;

        assert_eq!(catalog.products.len(), 1);
        assert_eq!(catalog.recipes.len(), 1);

        Ok(())
    }

    #[test]
    fn item_respects_kind() -> TestResult {
        let catalog = Catalog {
            products: vec![product(1, Some(Decimal::ONE))],
            recipes: vec![recipe(1)],
        };

        let as_product = catalog.item(LineKind::Product, CatalogId::new(1))?;
        let as_recipe = catalog.item(LineKind::Recipe, CatalogId::new(1))?;

        assert_eq!(as_product.map(|item| item.price()), Some(Decimal::ONE));
        assert_eq!(as_recipe.map(|item| item.price()), Some(Decimal::from(15)));
        assert_eq!(catalog.item(LineKind::Recipe, CatalogId::new(2))?, None);

        Ok(())
    }

    #[test]
    fn item_without_price_is_an_error() {
        let catalog = Catalog {
            products: vec![product(4, None)],
            recipes: Vec::new(),
        };

        assert_eq!(
            catalog.item(LineKind::Product, CatalogId::new(4)),
            Err(CatalogError::MissingPrice {
                kind: LineKind::Product,
                id: CatalogId::new(4),
            })
        );
    }
}
