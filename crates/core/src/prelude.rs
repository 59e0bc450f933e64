//! Caja prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, QuantityUpdate},
    catalog::{CatalogError, CatalogId, CatalogItem, Product, Recipe},
    checkout::{CheckoutItem, CheckoutRequest, SaleConfirmation, SaleId},
    context::{CheckoutContext, DiscountPercent},
    lines::{CartLine, LineId, LineKind},
    orders::{OrderError, OrderFile, OrderItem, OrderTarget},
    pricing::{TAX_RATE, TIP_RATE, Totals, compute_totals, round_to_cent},
    stock::{Shortfall, StockAdvisory, StockCheck, StockReport},
    summary::{CartSummary, SummaryError},
};
