// crates/shared-kernel/src/infrastructure/postgres/postgres_outbox_repository.rs

use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::domain::repositories::OutboxRepository;
use crate::domain::transaction::Transaction;
use crate::errors::Result;
use crate::infrastructure::TransactionExt;
use crate::infrastructure::postgres::mappers::SqlxErrorExt;
use async_trait::async_trait;

/// Append-only : écrit toujours dans la transaction du caller, jamais
/// sur une connexion propre.
pub struct PostgresOutboxRepository;

impl PostgresOutboxRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PostgresOutboxRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutboxRepository for PostgresOutboxRepository {
    async fn save(&self, tx: &mut dyn Transaction, event: &dyn DomainEvent) -> Result<()> {
        let sqlx_tx = tx.downcast_mut_postgres()?;
        let envelope = EventEnvelope::wrap(event);

        sqlx::query(
            r#"
            INSERT INTO outbox (id, aggregate_type, aggregate_id, event_type, payload, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(envelope.id)
        .bind(envelope.aggregate_type)
        .bind(envelope.aggregate_id)
        .bind(envelope.event_type)
        .bind(envelope.payload)
        .execute(&mut **sqlx_tx)
        .await
        .map_domain_infra("Failed to append event to outbox")?;

        Ok(())
    }
}
