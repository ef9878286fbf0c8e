// crates/orders/src/domain/pricing/static_pricing_catalog.rs

use crate::domain::pricing::PricingCatalog;
use crate::domain::value_objects::{Currency, Money, ProductId};
use async_trait::async_trait;
use shared_kernel::errors::{DomainError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Catalogue en mémoire. Adaptateur par défaut du port pricing et
/// double de test (erreur injectable).
pub struct StaticPricingCatalog {
    prices: Arc<Mutex<HashMap<ProductId, Money>>>,
    pub error_to_return: Arc<Mutex<Option<DomainError>>>,
}

impl StaticPricingCatalog {
    pub fn new() -> Self {
        Self {
            prices: Arc::new(Mutex::new(HashMap::new())),
            error_to_return: Arc::new(Mutex::new(None)),
        }
    }

    /// Catalogue de démonstration
    pub fn with_default_catalog() -> Self {
        let catalog = Self::new();
        let entries = [
            ("LAPTOP-001", 1299.99, Currency::Usd),
            ("MOUSE-001", 49.99, Currency::Usd),
            ("KEYBOARD-001", 89.99, Currency::Usd),
            ("MONITOR-EU-001", 349.50, Currency::Eur),
            ("MANGA-001", 1200.0, Currency::Jpy),
        ];

        for (code, amount, currency) in entries {
            catalog.set_price(
                ProductId::from_raw(code),
                Money::from_raw(amount, currency),
            );
        }
        catalog
    }

    pub fn set_price(&self, product_id: ProductId, price: Money) {
        self.prices.lock().unwrap().insert(product_id, price);
    }

    fn check_error(&self) -> Result<()> {
        if let Some(err) = self.error_to_return.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(())
    }
}

impl Default for StaticPricingCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingCatalog for StaticPricingCatalog {
    async fn price_of(&self, product_id: &ProductId) -> Result<Option<Money>> {
        self.check_error()?;
        Ok(self.prices.lock().unwrap().get(product_id).copied())
    }
}
