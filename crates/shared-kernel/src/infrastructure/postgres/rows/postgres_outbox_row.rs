// crates/shared-kernel/src/infrastructure/postgres/rows/postgres_outbox_row.rs

use crate::domain::events::EventEnvelope;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Struct privé à l'infrastructure pour le mapping sqlx.
/// Les colonnes TIMESTAMP sont lues naïves puis fixées en UTC.
#[derive(FromRow)]
pub struct OutboxRow {
    id: Uuid,
    aggregate_type: String,
    aggregate_id: String,
    event_type: String,
    payload: Value,
    created_at: NaiveDateTime,
}

impl From<OutboxRow> for EventEnvelope {
    fn from(row: OutboxRow) -> Self {
        Self {
            id: row.id,
            aggregate_type: row.aggregate_type,
            aggregate_id: row.aggregate_id,
            event_type: row.event_type,
            payload: row.payload,
            occurred_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}
