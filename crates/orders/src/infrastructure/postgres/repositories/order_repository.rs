// crates/orders/src/infrastructure/postgres/repositories/order_repository.rs

use crate::domain::entities::{Order, OrderItem};
use crate::domain::repositories::OrderRepository;
use crate::domain::value_objects::OrderId;
use async_trait::async_trait;
use bigdecimal::{BigDecimal, FromPrimitive};
use chrono::{DateTime, Utc};
use shared_kernel::domain::transaction::Transaction;
use shared_kernel::errors::{DomainError, Result};
use shared_kernel::infrastructure::postgres::mappers::SqlxErrorExt;
use sqlx::{PgPool, Postgres, query, query_as, query_scalar};
use uuid::Uuid;

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Valeurs prêtes à binder pour une ligne de commande
struct ItemRecord {
    id: Uuid,
    product_id: String,
    quantity: i32,
    unit_price: BigDecimal,
    total_price: BigDecimal,
    currency: &'static str,
}

impl ItemRecord {
    fn from_item(item: &OrderItem) -> Result<Self> {
        let subtotal = item.subtotal()?;
        Ok(Self {
            id: Uuid::now_v7(),
            product_id: item.product_id().as_str().to_string(),
            quantity: item.quantity().value() as i32,
            unit_price: decimal(item.unit_price().amount())?,
            total_price: decimal(subtotal.amount())?,
            currency: item.unit_price().currency().code(),
        })
    }
}

fn decimal(amount: f64) -> Result<BigDecimal> {
    BigDecimal::from_f64(amount)
        .ok_or_else(|| DomainError::Internal(format!("Amount {amount} is not representable")))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order, tx: &mut dyn Transaction) -> Result<()> {
        let id = order.order_id().as_str().to_string();
        let created_at = order.created_at().naive_utc();

        // Total par défaut (0 USD) quand la commande est vide ou
        // incohérente : comportement observable assumé.
        let (total_amount, currency) = match order.calculate_total() {
            Ok(total) => (decimal(total.amount())?, total.currency().code()),
            Err(_) => (BigDecimal::from(0), "USD"),
        };

        let items: Vec<ItemRecord> = order
            .items()
            .iter()
            .map(ItemRecord::from_item)
            .collect::<Result<_>>()?;

        <dyn Transaction>::execute_on(&self.pool, Some(tx), move |conn| {
            Box::pin(async move {
                // 1. UPSERT de l'entête : created_at n'est jamais réécrit
                query(
                    r#"
                    INSERT INTO orders (id, customer_id, status, total_amount, currency, created_at, updated_at)
                    VALUES ($1, NULL, 'PENDING', $2, $3, $4, NOW())
                    ON CONFLICT (id) DO UPDATE SET
                        total_amount = EXCLUDED.total_amount,
                        currency = EXCLUDED.currency,
                        updated_at = EXCLUDED.updated_at
                    "#,
                )
                .bind(&id)
                .bind(&total_amount)
                .bind(currency)
                .bind(created_at)
                .execute(&mut *conn)
                .await
                .map_domain::<Order>()?;

                // 2. Réécriture complète des lignes : l'agrégat possède
                //    l'ensemble, pas de diff
                query("DELETE FROM order_items WHERE order_id = $1")
                    .bind(&id)
                    .execute(&mut *conn)
                    .await
                    .map_domain::<Order>()?;

                // clock_timestamp() pour garder l'ordre d'insertion au
                // rechargement (NOW() serait identique pour tout le lot)
                for item in &items {
                    query(
                        r#"
                        INSERT INTO order_items
                            (id, order_id, product_id, quantity, unit_price, total_price, currency, created_at)
                        VALUES ($1, $2, $3, $4, $5, $6, $7, clock_timestamp())
                        "#,
                    )
                    .bind(item.id)
                    .bind(&id)
                    .bind(&item.product_id)
                    .bind(item.quantity)
                    .bind(&item.unit_price)
                    .bind(&item.total_price)
                    .bind(item.currency)
                    .execute(&mut *conn)
                    .await
                    .map_domain::<Order>()?;
                }

                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>> {
        use crate::infrastructure::postgres::rows::{PostgresOrderItemRow, PostgresOrderRow};

        let id_str = id.as_str().to_string();
        let row = <dyn Transaction>::execute_on(&self.pool, None, move |conn| {
            Box::pin(async move {
                query_as::<_, PostgresOrderRow>(
                    "SELECT id, customer_id, status, total_amount, currency, created_at, updated_at \
                     FROM orders WHERE id = $1",
                )
                .bind(id_str)
                .fetch_optional(&mut *conn)
                .await
                .map_domain::<Order>()
            })
        })
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id_str = id.as_str().to_string();
        let item_rows = <dyn Transaction>::execute_on(&self.pool, None, move |conn| {
            Box::pin(async move {
                query_as::<_, PostgresOrderItemRow>(
                    "SELECT id, product_id, quantity, unit_price, currency \
                     FROM order_items WHERE order_id = $1 ORDER BY created_at ASC",
                )
                .bind(id_str)
                .fetch_all(&mut *conn)
                .await
                .map_domain::<Order>()
            })
        })
        .await?;

        // Une ligne cassée est abandonnée individuellement, elle ne
        // fait pas échouer le chargement
        let items: Vec<OrderItem> = item_rows
            .into_iter()
            .filter_map(|item_row| {
                let row_id = item_row.id;
                match item_row.try_into_item() {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(
                            item_id = %row_id,
                            error = %e,
                            "Dropping order item row that failed reconstruction"
                        );
                        None
                    }
                }
            })
            .collect();

        let created_at = row
            .created_at
            .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
            .unwrap_or_else(Utc::now);

        Ok(Some(Order::reconstitute(
            OrderId::from_raw(row.id),
            items,
            created_at,
        )))
    }

    async fn exists(&self, id: &OrderId) -> Result<bool> {
        let id_str = id.as_str().to_string();
        <dyn Transaction>::execute_on(&self.pool, None, move |conn| {
            Box::pin(async move {
                query_scalar::<Postgres, bool>("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
                    .bind(id_str)
                    .fetch_one(&mut *conn)
                    .await
                    .map_domain::<Order>()
            })
        })
        .await
    }
}
