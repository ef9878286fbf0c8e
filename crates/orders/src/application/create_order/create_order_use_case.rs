// crates/orders/src/application/create_order/create_order_use_case.rs

use crate::application::create_order::CreateOrderCommand;
use crate::domain::entities::Order;
use crate::domain::repositories::OrderRepository;
use crate::domain::value_objects::OrderId;
use shared_kernel::domain::events::AggregateRoot;
use shared_kernel::domain::repositories::OutboxRepository;
use shared_kernel::domain::transaction::{Transaction, TransactionManager};
use shared_kernel::errors::{DomainError, Result};
use std::sync::Arc;

pub struct CreateOrderUseCase {
    order_repo: Arc<dyn OrderRepository>,
    outbox_repo: Arc<dyn OutboxRepository>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl CreateOrderUseCase {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        outbox_repo: Arc<dyn OutboxRepository>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            order_repo,
            outbox_repo,
            tx_manager,
        }
    }

    pub async fn execute(&self, command: CreateOrderCommand) -> Result<Order> {
        // 1. Identifiant fourni ou généré. Une chaîne vide équivaut à
        //    une absence ; une chaîne d'espaces est une erreur.
        let order_id = match command.order_id.as_deref() {
            Some(raw) if !raw.is_empty() => OrderId::try_new(raw)?,
            _ => OrderId::generate(),
        };

        // 2. Unicité
        if self.order_repo.exists(&order_id).await? {
            return Err(DomainError::Conflict {
                reason: "duplicate_order_id".into(),
            });
        }

        // 3. Construction de l'agrégat (émet OrderCreated)
        let mut order = Order::create(order_id);
        let events = order.pull_events();

        // 4. Persistance atomique : la commande et ses événements
        //    partagent le même commit
        let order_to_save = order.clone();
        let order_repo = Arc::clone(&self.order_repo);
        let outbox_repo = Arc::clone(&self.outbox_repo);

        self.tx_manager
            .in_transaction(Box::new(move |tx: &mut dyn Transaction| {
                Box::pin(async move {
                    order_repo.save(&order_to_save, &mut *tx).await?;
                    outbox_repo.save_all(&mut *tx, &events).await?;
                    Ok(())
                })
            }))
            .await?;

        Ok(order)
    }
}
