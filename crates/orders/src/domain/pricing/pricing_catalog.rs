// crates/orders/src/domain/pricing/pricing_catalog.rs

use crate::domain::value_objects::{Money, ProductId};
use async_trait::async_trait;
use shared_kernel::errors::Result;

/// Port vers le catalogue de prix : lecture pure, aucune mutation.
#[async_trait]
pub trait PricingCatalog: Send + Sync {
    /// Prix unitaire courant d'un produit, `None` si inconnu
    async fn price_of(&self, product_id: &ProductId) -> Result<Option<Money>>;
}
