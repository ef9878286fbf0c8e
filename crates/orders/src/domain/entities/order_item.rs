// crates/orders/src/domain/entities/order_item.rs

use crate::domain::value_objects::{Money, ProductId, Quantity};
use shared_kernel::errors::Result;

/// Ligne de commande immuable : toute évolution passe par une nouvelle
/// valeur.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    product_id: ProductId,
    quantity: Quantity,
    unit_price: Money,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: Quantity, unit_price: Money) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Nouvelle ligne avec la quantité augmentée.
    /// Le prix unitaire stocké est conservé tel quel.
    pub fn increment(&self, additional: Quantity) -> OrderItem {
        Self {
            product_id: self.product_id.clone(),
            quantity: self.quantity.add(additional),
            unit_price: self.unit_price,
        }
    }

    pub fn subtotal(&self) -> Result<Money> {
        self.unit_price.multiply(f64::from(self.quantity.value()))
    }
}

impl std::fmt::Display for OrderItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subtotal = self
            .subtotal()
            .unwrap_or_else(|_| Money::zero(self.unit_price.currency()));
        write!(
            f,
            "{} x{} @ {} = {}",
            self.product_id, self.quantity, self.unit_price, subtotal
        )
    }
}
