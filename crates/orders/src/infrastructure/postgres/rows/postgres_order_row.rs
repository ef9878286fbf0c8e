// crates/orders/src/infrastructure/postgres/rows/postgres_order_row.rs

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use sqlx::FromRow;

/// Mapping sqlx de la table `orders`. Les colonnes sont nullables dans
/// le schéma : on reste en Option et on tranche à la reconstruction.
#[derive(FromRow)]
pub struct PostgresOrderRow {
    pub id: String,
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub total_amount: Option<BigDecimal>,
    pub currency: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
