// crates/shared-kernel/src/infrastructure/sinks/noop_event_sink.rs

use crate::application::ports::EventSink;
use crate::domain::events::EventEnvelope;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Sink sans broker : garde les enveloppes en mémoire et simule la
/// latence d'une publication réelle (5 à 25 ms). Sert de sink par défaut
/// en dev/test ; aucune garantie de persistance.
pub struct NoopEventSink {
    published: Arc<Mutex<Vec<EventEnvelope>>>,
    echo: bool,
    failures_left: Arc<Mutex<u32>>,
}

impl NoopEventSink {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            echo: false,
            failures_left: Arc::new(Mutex::new(0)),
        }
    }

    /// Variante bavarde : trace chaque enveloppe livrée
    pub fn with_echo() -> Self {
        Self {
            echo: true,
            ..Self::new()
        }
    }

    /// Arme `count` échecs simulés sur les prochains publish
    pub fn fail_times(&self, count: u32) {
        *self.failures_left.lock().unwrap() = count;
    }

    // --- Inspection (tests) ---

    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }

    pub fn published_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.published.lock().unwrap().clear();
    }
}

impl Default for NoopEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for NoopEventSink {
    async fn publish(&self, envelope: &EventEnvelope) -> AppResult<()> {
        {
            let mut failures = self.failures_left.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(AppError::new(
                    ErrorCode::InfrastructureFailure,
                    "Simulated sink failure",
                ));
            }
        }

        let delay_ms = rand::rng().random_range(5..=25);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        if self.echo {
            tracing::info!(
                event_type = %envelope.event_type,
                aggregate_id = %envelope.aggregate_id,
                "noop sink delivered event"
            );
        }

        self.published.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}
