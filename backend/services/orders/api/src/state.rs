// backend/services/orders/api/src/state.rs

use orders::application::add_item_to_order::AddItemToOrderUseCase;
use orders::application::create_order::CreateOrderUseCase;
use orders::domain::pricing::{PricingCatalog, StaticPricingCatalog};
use orders::domain::repositories::{OrderRepository, OrderRepositoryStub};
use orders::infrastructure::postgres::PostgresOrderRepository;
use shared_kernel::domain::repositories::{InMemoryOutbox, OutboxRepository};
use shared_kernel::domain::transaction::{StubTxManager, TransactionManager};
use shared_kernel::infrastructure::postgres::PostgresOutboxRepository;
use shared_kernel::infrastructure::postgres::transactions::PostgresTransactionManager;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;

/// État partagé des handlers : les deux use cases et l'instant de boot
/// (pour l'uptime du health check).
pub struct AppState {
    pub create_order: Arc<CreateOrderUseCase>,
    pub add_item_to_order: Arc<AddItemToOrderUseCase>,
    pub started_at: Instant,
}

/// Poignées sur les doubles en mémoire, pour l'inspection en test
pub struct InMemoryHandles {
    pub order_repo: Arc<OrderRepositoryStub>,
    pub outbox: Arc<InMemoryOutbox>,
    pub pricing: Arc<StaticPricingCatalog>,
}

impl AppState {
    /// Câblage USE_INMEMORY : stubs partout, aucun dispatcher
    pub fn in_memory() -> (Arc<Self>, InMemoryHandles) {
        let order_repo = Arc::new(OrderRepositoryStub::new());
        let outbox = Arc::new(InMemoryOutbox::new());
        let pricing = Arc::new(StaticPricingCatalog::with_default_catalog());

        let state = Self::wire(
            order_repo.clone(),
            outbox.clone(),
            pricing.clone(),
            Arc::new(StubTxManager),
        );

        (
            state,
            InMemoryHandles {
                order_repo,
                outbox,
                pricing,
            },
        )
    }

    /// Câblage persistant sur un pool Postgres
    pub fn postgres(pool: PgPool) -> Arc<Self> {
        Self::wire(
            Arc::new(PostgresOrderRepository::new(pool.clone())),
            Arc::new(PostgresOutboxRepository::new()),
            Arc::new(StaticPricingCatalog::with_default_catalog()),
            Arc::new(PostgresTransactionManager::new(pool)),
        )
    }

    fn wire(
        order_repo: Arc<dyn OrderRepository>,
        outbox_repo: Arc<dyn OutboxRepository>,
        pricing: Arc<dyn PricingCatalog>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Arc<Self> {
        Arc::new(Self {
            create_order: Arc::new(CreateOrderUseCase::new(
                order_repo.clone(),
                outbox_repo.clone(),
                tx_manager.clone(),
            )),
            add_item_to_order: Arc::new(AddItemToOrderUseCase::new(
                order_repo,
                outbox_repo,
                pricing,
                tx_manager,
            )),
            started_at: Instant::now(),
        })
    }
}
