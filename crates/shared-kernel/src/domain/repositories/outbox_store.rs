// crates/shared-kernel/src/domain/repositories/outbox_store.rs

use crate::domain::events::EventEnvelope;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct OutboxStats {
    pub pending_events: i64,
    pub published_events: i64,
    pub oldest_pending_event: Option<DateTime<Utc>>,
}

/// Un lot de lignes réclamées par UN worker. Tant que le claim est ouvert,
/// aucun autre worker ne peut voir ces lignes ; `commit` les tamponne
/// publiées, `abort` les rend au pool des lignes en attente.
#[async_trait]
pub trait OutboxClaim: Send {
    /// Les enveloppes du claim, FIFO par date d'insertion
    fn events(&self) -> &[EventEnvelope];

    async fn commit(self: Box<Self>) -> Result<()>;

    async fn abort(self: Box<Self>) -> Result<()>;
}

/// Lecture côté dispatcher : réclamation de lots, statistiques et
/// compactage de l'historique publié.
#[async_trait]
pub trait OutboxStore: Send + Sync {
    /// Réclame jusqu'à `limit` lignes en attente. Sûr sous N workers
    /// parallèles : deux claims ne partagent jamais une ligne.
    async fn claim_pending(&self, limit: u32) -> Result<Box<dyn OutboxClaim>>;

    async fn stats(&self) -> Result<OutboxStats>;

    /// Supprime les lignes publiées avant `cutoff`. Ne touche jamais
    /// les lignes en attente. Retourne le nombre supprimé.
    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}
