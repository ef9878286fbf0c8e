// crates/shared-kernel/src/domain/repositories/outbox_repository.rs

use crate::domain::events::DomainEvent;
use crate::domain::transaction::Transaction;
use crate::errors::Result;
use async_trait::async_trait;

/// Écriture côté producteur : les événements rejoignent la table outbox
/// DANS la transaction du caller, donc avec la même visibilité de commit
/// que les données métier.
#[async_trait]
pub trait OutboxRepository: Send + Sync {
    async fn save(&self, tx: &mut dyn Transaction, event: &dyn DomainEvent) -> Result<()>;

    /// Insère les événements dans l'ordre d'émission.
    async fn save_all(
        &self,
        tx: &mut dyn Transaction,
        events: &[Box<dyn DomainEvent>],
    ) -> Result<()> {
        for event in events {
            self.save(&mut *tx, event.as_ref()).await?;
        }
        Ok(())
    }
}
