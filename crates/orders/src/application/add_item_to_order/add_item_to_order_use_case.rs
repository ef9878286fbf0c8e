// crates/orders/src/application/add_item_to_order/add_item_to_order_use_case.rs

use crate::application::add_item_to_order::AddItemToOrderCommand;
use crate::domain::entities::Order;
use crate::domain::pricing::PricingCatalog;
use crate::domain::repositories::OrderRepository;
use crate::domain::value_objects::{OrderId, ProductId, Quantity};
use shared_kernel::domain::entities::EntityOptionExt;
use shared_kernel::domain::events::AggregateRoot;
use shared_kernel::domain::repositories::OutboxRepository;
use shared_kernel::domain::transaction::{Transaction, TransactionManager};
use shared_kernel::errors::{DomainError, Result};
use std::sync::Arc;

pub struct AddItemToOrderUseCase {
    order_repo: Arc<dyn OrderRepository>,
    outbox_repo: Arc<dyn OutboxRepository>,
    pricing: Arc<dyn PricingCatalog>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl AddItemToOrderUseCase {
    pub fn new(
        order_repo: Arc<dyn OrderRepository>,
        outbox_repo: Arc<dyn OutboxRepository>,
        pricing: Arc<dyn PricingCatalog>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            order_repo,
            outbox_repo,
            pricing,
            tx_manager,
        }
    }

    pub async fn execute(&self, command: AddItemToOrderCommand) -> Result<Order> {
        // 1. Validation des entrées, dans l'ordre contractuel : la
        //    première erreur nomme son champ
        let order_id = OrderId::try_new(command.order_id)?;
        let product_id = ProductId::try_new(command.product_id)?;
        let quantity = Quantity::try_new(command.quantity)?;

        // 2. Chargement de l'agrégat
        let mut order = self
            .order_repo
            .find_by_id(&order_id)
            .await?
            .ok_or_not_found(&order_id)?;

        // 3. Prix catalogue
        let unit_price = self
            .pricing
            .price_of(&product_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "Product",
                id: product_id.to_string(),
            })?;

        // 4. Mutation du modèle riche
        order.add_item(product_id, quantity, unit_price)?;
        let events = order.pull_events();

        // 5. Persistance atomique
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
