#[cfg(test)]
mod tests {
    use crate::application::create_order::{CreateOrderCommand, CreateOrderUseCase};
    use crate::domain::repositories::OrderRepositoryStub;
    use crate::domain::value_objects::OrderId;
    use shared_kernel::domain::repositories::InMemoryOutbox;
    use shared_kernel::domain::transaction::StubTxManager;
    use shared_kernel::errors::DomainError;
    use std::sync::Arc;

    fn setup() -> (
        CreateOrderUseCase,
        Arc<OrderRepositoryStub>,
        Arc<InMemoryOutbox>,
    ) {
        let order_repo = Arc::new(OrderRepositoryStub::new());
        let outbox = Arc::new(InMemoryOutbox::new());
        let use_case = CreateOrderUseCase::new(
            order_repo.clone(),
            outbox.clone(),
            Arc::new(StubTxManager),
        );
        (use_case, order_repo, outbox)
    }

    #[tokio::test]
    async fn test_create_with_generated_id() {
        let (use_case, order_repo, outbox) = setup();

        let order = use_case
            .execute(CreateOrderCommand { order_id: None })
            .await
            .unwrap();

        assert!(order.order_id().as_str().starts_with("ORD-"));
        assert_eq!(order.item_count(), 0);
        assert_eq!(order_repo.order_count(), 1);

        // Exactement un événement dans l'outbox, non publié
        let envelopes = outbox.pending_envelopes();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].event_type, "OrderCreated");
        assert_eq!(envelopes[0].aggregate_type, "Order");
        assert_eq!(envelopes[0].aggregate_id, order.order_id().as_str());
    }

    #[tokio::test]
    async fn test_empty_string_id_triggers_generation() {
        let (use_case, _, _) = setup();

        let order = use_case
            .execute(CreateOrderCommand {
                order_id: Some(String::new()),
            })
            .await
            .unwrap();

        assert!(order.order_id().as_str().starts_with("ORD-"));
    }

    #[tokio::test]
    async fn test_whitespace_only_id_fails_validation() {
        let (use_case, order_repo, outbox) = setup();

        let result = use_case
            .execute(CreateOrderCommand {
                order_id: Some("   ".into()),
            })
            .await;

        assert!(
            matches!(result, Err(DomainError::Validation { field, .. }) if field == "order_id")
        );
        assert_eq!(order_repo.order_count(), 0);
        assert_eq!(outbox.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_explicit_id_is_kept() {
        let (use_case, _, _) = setup();

        let order = use_case
            .execute(CreateOrderCommand {
                order_id: Some("ORD-CUSTOM-42".into()),
            })
            .await
            .unwrap();

        assert_eq!(order.order_id().as_str(), "ORD-CUSTOM-42");
    }

    #[tokio::test]
    async fn test_duplicate_id_is_a_conflict() {
        let (use_case, order_repo, outbox) = setup();

        use_case
            .execute(CreateOrderCommand {
                order_id: Some("ORD-DUP".into()),
            })
            .await
            .unwrap();

        let result = use_case
            .execute(CreateOrderCommand {
                order_id: Some("ORD-DUP".into()),
            })
            .await;

        assert!(
            matches!(result, Err(DomainError::Conflict { ref reason }) if reason == "duplicate_order_id")
        );
        // Une seule commande, un seul événement
        assert_eq!(order_repo.order_count(), 1);
        assert_eq!(outbox.pending_count(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_infrastructure_error() {
        let (use_case, order_repo, _) = setup();
        *order_repo.error_to_return.lock().unwrap() =
            Some(DomainError::Infrastructure("connection reset".into()));

        let result = use_case.execute(CreateOrderCommand { order_id: None }).await;
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_no_outbox_row_without_a_successful_save() {
        let (use_case, order_repo, outbox) = setup();

        // L'échec du save doit annuler l'écriture outbox du même lot
        // (ici le stub échoue avant toute insertion)
        *order_repo.error_to_return.lock().unwrap() =
            Some(DomainError::Infrastructure("disk full".into()));

        let id = OrderId::generate();
        let result = use_case
            .execute(CreateOrderCommand {
                order_id: Some(id.as_str().into()),
            })
            .await;

        assert!(result.is_err());
        assert_eq!(outbox.pending_count(), 0);
    }
}
