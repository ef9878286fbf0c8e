// crates/orders/src/domain/repositories/order_repository_stub.rs

use crate::domain::entities::Order;
use crate::domain::repositories::OrderRepository;
use crate::domain::value_objects::OrderId;
use async_trait::async_trait;
use shared_kernel::domain::transaction::Transaction;
use shared_kernel::errors::{DomainError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Double en mémoire, également utilisé comme repository du mode
/// USE_INMEMORY.
#[derive(Default)]
pub struct OrderRepositoryStub {
    /// Stockage en mémoire : OrderId -> Order
    pub orders: Arc<Mutex<HashMap<OrderId, Order>>>,
    /// Permet de simuler une erreur retournée par n'importe quelle méthode
    pub error_to_return: Arc<Mutex<Option<DomainError>>>,
}

impl OrderRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injecte une commande avant un test
    pub fn add_order(&self, order: Order) {
        self.orders
            .lock()
            .unwrap()
            .insert(order.order_id().clone(), order);
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    fn check_error(&self) -> Result<()> {
        if let Some(err) = self.error_to_return.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryStub {
    async fn save(&self, order: &Order, _tx: &mut dyn Transaction) -> Result<()> {
        self.check_error()?;
        self.orders
            .lock()
            .unwrap()
            .insert(order.order_id().clone(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>> {
        self.check_error()?;
        Ok(self.orders.lock().unwrap().get(id).cloned())
    }

    async fn exists(&self, id: &OrderId) -> Result<bool> {
        self.check_error()?;
        Ok(self.orders.lock().unwrap().contains_key(id))
    }
}
