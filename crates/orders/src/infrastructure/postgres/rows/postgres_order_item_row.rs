// crates/orders/src/infrastructure/postgres/rows/postgres_order_item_row.rs

use crate::domain::entities::OrderItem;
use crate::domain::value_objects::{Currency, Money, ProductId, Quantity};
use bigdecimal::{BigDecimal, ToPrimitive};
use shared_kernel::errors::{DomainError, Result};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
pub struct PostgresOrderItemRow {
    pub id: Uuid,
    pub product_id: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<BigDecimal>,
    pub currency: Option<String>,
}

impl PostgresOrderItemRow {
    /// Reconstruit la ligne en repassant par les constructeurs
    /// validants. Toute colonne manquante ou invalide fait échouer LA
    /// ligne, pas le chargement complet.
    pub fn try_into_item(self) -> Result<OrderItem> {
        let product_id = ProductId::try_new(
            self.product_id
                .ok_or_else(|| Self::missing("product_id"))?,
        )?;

        let quantity = Quantity::try_new(f64::from(
            self.quantity.ok_or_else(|| Self::missing("quantity"))?,
        ))?;

        let amount = self
            .unit_price
            .ok_or_else(|| Self::missing("unit_price"))?
            .to_f64()
            .ok_or_else(|| {
                DomainError::Internal("Numeric unit_price out of f64 range".into())
            })?;

        let currency =
            Currency::try_new(&self.currency.ok_or_else(|| Self::missing("currency"))?)?;

        Ok(OrderItem::new(
            product_id,
            quantity,
            Money::try_new(amount, currency)?,
        ))
    }

    fn missing(column: &str) -> DomainError {
        DomainError::Internal(format!("order_items row with NULL {column}"))
    }
}
