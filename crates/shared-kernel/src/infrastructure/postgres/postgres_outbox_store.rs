// crates/shared-kernel/src/infrastructure/postgres/postgres_outbox_store.rs

use crate::domain::events::EventEnvelope;
use crate::domain::repositories::{OutboxClaim, OutboxStats, OutboxStore};
use crate::errors::Result;
use crate::infrastructure::postgres::mappers::SqlxErrorExt;
use crate::infrastructure::postgres::rows::OutboxRow;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PostgresOutboxStore {
    pool: PgPool,
}

impl PostgresOutboxStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OutboxStore for PostgresOutboxStore {
    async fn claim_pending(&self, limit: u32) -> Result<Box<dyn OutboxClaim>> {
        // La transaction reste ouverte jusqu'au commit/abort du claim :
        // les verrous de ligne partitionnent le travail entre workers.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_domain_infra("Failed to begin outbox claim")?;

        let sql = r#"
            SELECT id, aggregate_type, aggregate_id, event_type, payload, created_at
            FROM outbox
            WHERE published_at IS NULL
            ORDER BY created_at ASC
            LIMIT $1
            FOR UPDATE SKIP LOCKED
        "#;

        let rows = sqlx::query_as::<_, OutboxRow>(sql)
            .bind(i64::from(limit))
            .fetch_all(&mut *tx)
            .await
            .map_domain_infra("Failed to claim pending outbox rows")?;

        let events: Vec<EventEnvelope> = rows.into_iter().map(EventEnvelope::from).collect();
        let ids: Vec<Uuid> = events.iter().map(|e| e.id).collect();

        Ok(Box::new(PostgresOutboxClaim { tx, ids, events }))
    }

    async fn stats(&self) -> Result<OutboxStats> {
        let sql = r#"
            SELECT
                COUNT(*) FILTER (WHERE published_at IS NULL) AS pending,
                COUNT(*) FILTER (WHERE published_at IS NOT NULL) AS published,
                MIN(created_at) FILTER (WHERE published_at IS NULL) AS oldest_pending
            FROM outbox
        "#;

        let row = sqlx::query_as::<_, StatsRow>(sql)
            .fetch_one(&self.pool)
            .await
            .map_domain_infra("Failed to read outbox stats")?;

        Ok(OutboxStats {
            pending_events: row.pending,
            published_events: row.published,
            oldest_pending_event: row
                .oldest_pending
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc)),
        })
    }

    async fn purge_published_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let deleted =
            sqlx::query("DELETE FROM outbox WHERE published_at IS NOT NULL AND published_at < $1")
                .bind(cutoff.naive_utc())
                .execute(&self.pool)
                .await
                .map_domain_infra("Failed to purge published outbox rows")?;

        Ok(deleted.rows_affected())
    }
}

#[derive(FromRow)]
struct StatsRow {
    pending: i64,
    published: i64,
    oldest_pending: Option<NaiveDateTime>,
}

struct PostgresOutboxClaim {
    tx: sqlx::Transaction<'static, sqlx::Postgres>,
    ids: Vec<Uuid>,
    events: Vec<EventEnvelope>,
}

#[async_trait]
impl OutboxClaim for PostgresOutboxClaim {
    fn events(&self) -> &[EventEnvelope] {
        &self.events
    }

    async fn commit(mut self: Box<Self>) -> Result<()> {
        if !self.ids.is_empty() {
            sqlx::query("UPDATE outbox SET published_at = NOW() WHERE id = ANY($1)")
                .bind(&self.ids)
                .execute(&mut *self.tx)
                .await
                .map_domain_infra("Failed to stamp outbox rows as published")?;
        }

        self.tx
            .commit()
            .await
            .map_domain_infra("Failed to commit outbox claim")
    }

    async fn abort(self: Box<Self>) -> Result<()> {
        self.tx
            .rollback()
            .await
            .map_domain_infra("Failed to roll back outbox claim")
    }
}
