// crates/orders/src/domain/repositories/order_repository.rs

use crate::domain::entities::Order;
use crate::domain::value_objects::OrderId;
use async_trait::async_trait;
use shared_kernel::domain::transaction::Transaction;
use shared_kernel::errors::Result;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persiste l'agrégat complet dans la transaction fournie
    /// (stratégie rewrite-items : l'agrégat possède l'ensemble des
    /// lignes, on ne diffe jamais).
    async fn save(&self, order: &Order, tx: &mut dyn Transaction) -> Result<()>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>>;

    /// Présence par clé primaire, sans charger l'agrégat
    async fn exists(&self, id: &OrderId) -> Result<bool>;
}
