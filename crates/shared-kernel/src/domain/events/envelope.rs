// crates/shared-kernel/src/domain/events/envelope.rs

use crate::domain::events::DomainEvent;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::borrow::Cow;
use uuid::Uuid;

/// Forme sérialisée d'un événement, telle qu'elle circule entre la table
/// outbox et le sink externe.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
    pub occurred_at: DateTime<Utc>,
}

impl EventEnvelope {
    pub fn wrap(event: &dyn DomainEvent) -> Self {
        Self {
            id: event.event_id(),
            aggregate_type: event.aggregate_type().into_owned(),
            aggregate_id: event.aggregate_id(),
            event_type: event.event_type().into_owned(),
            payload: event.payload(),
            occurred_at: event.occurred_at(),
        }
    }
}

// L'enveloppe est elle-même un DomainEvent : elle se manipule comme
// n'importe quel événement du système.
impl DomainEvent for EventEnvelope {
    fn event_id(&self) -> Uuid {
        self.id
    }
    fn event_type(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.event_type)
    }
    fn aggregate_type(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.aggregate_type)
    }
    fn aggregate_id(&self) -> String {
        self.aggregate_id.clone()
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn payload(&self) -> Value {
        self.payload.clone()
    }
}
