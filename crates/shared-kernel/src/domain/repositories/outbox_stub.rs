// crates/shared-kernel/src/domain/repositories/outbox_stub.rs

use crate::clock::{Clock, SystemClock};
use crate::domain::events::{DomainEvent, EventEnvelope};
use crate::domain::repositories::{OutboxClaim, OutboxRepository, OutboxStats, OutboxStore};
use crate::domain::transaction::Transaction;
use crate::errors::{DomainError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredRow {
    envelope: EventEnvelope,
    created_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    claimed: bool,
    // Nombre de fois où la ligne a été tamponnée publiée.
    // Doit rester à 1 quel que soit le nombre de workers.
    publish_stamps: u32,
}

/// Double en mémoire jouant les deux rôles de la table outbox :
/// `OutboxRepository` côté écriture et `OutboxStore` côté dispatcher.
/// La sémantique de claim (invisibilité des lignes réclamées) est
/// reproduite avec un simple marquage sous mutex.
pub struct InMemoryOutbox {
    rows: Arc<Mutex<Vec<StoredRow>>>,
    clock: Arc<dyn Clock>,
    pub error_to_return: Arc<Mutex<Option<DomainError>>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            clock,
            error_to_return: Arc::new(Mutex::new(None)),
        }
    }

    /// Injecte une enveloppe directement (seed de tests)
    pub fn seed_envelope(&self, envelope: EventEnvelope) {
        let created_at = self.clock.now();
        self.rows.lock().unwrap().push(StoredRow {
            envelope,
            created_at,
            published_at: None,
            claimed: false,
            publish_stamps: 0,
        });
    }

    pub fn pending_count(&self) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.published_at.is_none())
            .count()
    }

    pub fn published_count(&self) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.published_at.is_some())
            .count()
    }

    pub fn pending_envelopes(&self) -> Vec<EventEnvelope> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.published_at.is_none())
            .map(|row| row.envelope.clone())
            .collect()
    }

    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|row| row.envelope.clone())
            .collect()
    }

    /// Vrai si chaque ligne publiée a été tamponnée exactement une fois
    pub fn stamped_exactly_once(&self) -> bool {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .all(|row| match row.published_at {
                Some(_) => row.publish_stamps == 1,
                None => row.publish_stamps == 0,
            })
    }

    fn check_error(&self) -> Result<()> {
        if let Some(err) = self.error_to_return.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(())
    }
}

impl Default for InMemoryOutbox {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutboxRepository for InMemoryOutbox {
    async fn save(&self, _tx: &mut dyn Transaction, event: &dyn DomainEvent) -> Result<()> {
        self.check_error()?;
        self.seed_envelope(EventEnvelope::wrap(event));
        Ok(())
    }
}

#[async_trait]
impl OutboxStore for InMemoryOutbox {
    async fn claim_pending(&self, limit: u32) -> Result<Box<dyn OutboxClaim>> {
        self.check_error()?;

        let mut rows = self.rows.lock().unwrap();
        let mut ids = Vec::new();
        let mut events = Vec::new();

        for row in rows.iter_mut() {
            if events.len() as u32 >= limit {
                break;
            }
            if row.published_at.is_none() && !row.claimed {
                row.claimed = true;
                ids.push(row.envelope.id);
                events.push(row.envelope.clone());
            }
        }

        Ok(Box::new(InMemoryClaim {
            rows: Arc::clone(&self.rows),
            clock: Arc::clone(&self.clock),
            ids,
            events,
        }))
    }

    async fn stats(&self) -> Result<OutboxStats> {
        self.check_error()?;

        let rows = self.rows.lock().unwrap();
        let pending = rows.iter().filter(|r| r.published_at.is_none()).count() as i64;
        let published = rows.iter().filter(|r| r.published_at.is_some()).count() as i64;
        let oldest_pending = rows
            .iter()
            .filter(|r| r.published_at.is_none())
            .map(|r| r.created_at)
            .min();

        Ok(OutboxStats {
            pending_events: pending,
            published_events: published,
            oldest_pending_event: oldest_pending,
        })
    }

    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        self.check_error()?;

        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| match row.published_at {
            Some(published_at) => published_at >= cutoff,
            None => true,
        });
        Ok((before - rows.len()) as u64)
    }
}

struct InMemoryClaim {
    rows: Arc<Mutex<Vec<StoredRow>>>,
    clock: Arc<dyn Clock>,
    ids: Vec<Uuid>,
    events: Vec<EventEnvelope>,
}

#[async_trait]
impl OutboxClaim for InMemoryClaim {
    fn events(&self) -> &[EventEnvelope] {
        &self.events
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let now = self.clock.now();
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if self.ids.contains(&row.envelope.id) {
                row.published_at = Some(now);
                row.publish_stamps += 1;
                row.claimed = false;
            }
        }
        Ok(())
    }

    async fn abort(self: Box<Self>) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if self.ids.contains(&row.envelope.id) {
                row.claimed = false;
            }
        }
        Ok(())
    }
}
