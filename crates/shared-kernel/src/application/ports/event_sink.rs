// crates/shared-kernel/src/application/ports/event_sink.rs

use crate::domain::events::EventEnvelope;
use crate::errors::AppResult;
use async_trait::async_trait;

/// Destination finale des événements drainés par le dispatcher.
/// Livraison at-least-once : le sink DOIT être idempotent sur
/// `envelope.id`, les redélivrances sont normales.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, envelope: &EventEnvelope) -> AppResult<()>;

    /// Publie un lot, dans l'ordre.
    async fn publish_batch(&self, envelopes: &[EventEnvelope]) -> AppResult<()> {
        for envelope in envelopes {
            self.publish(envelope).await?;
        }
        Ok(())
    }
}
