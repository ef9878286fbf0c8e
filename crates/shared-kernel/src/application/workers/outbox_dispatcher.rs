// crates/shared-kernel/src/application/workers/outbox_dispatcher.rs

use crate::application::ports::EventSink;
use crate::domain::repositories::{OutboxStats, OutboxStore};
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Boucle de polling qui draine la table outbox vers le sink externe.
///
/// Plusieurs instances peuvent tourner en parallèle sur la même table :
/// le store garantit qu'un claim n'est jamais partagé. Chaque lot est
/// publié en FIFO puis tamponné publié dans LA MÊME transaction que le
/// claim ; un crash entre publication et tampon provoque une
/// redélivrance (at-least-once).
pub struct OutboxDispatcher<Store, Sink>
where
    Store: OutboxStore + 'static,
    Sink: EventSink + 'static,
{
    store: Arc<Store>,
    sink: Arc<Sink>,
    batch_size: u32,
    poll_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<Store, Sink> OutboxDispatcher<Store, Sink>
where
    Store: OutboxStore + 'static,
    Sink: EventSink + 'static,
{
    pub fn new(
        store: Arc<Store>,
        sink: Arc<Sink>,
        batch_size: u32,
        poll_interval: Duration,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            store,
            sink,
            batch_size,
            poll_interval,
            shutdown_tx,
            worker: Mutex::new(None),
        }
    }

    /// Lance le worker en tâche de fond. Idempotent : un second appel
    /// pendant que le worker tourne est ignoré avec un warning.
    pub fn start(&self) {
        let mut worker = self.worker.lock().unwrap();
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::warn!("Outbox dispatcher already started, ignoring");
            return;
        }

        let _ = self.shutdown_tx.send(false);
        let store = Arc::clone(&self.store);
        let sink = Arc::clone(&self.sink);
        let batch_size = self.batch_size;
        let poll_interval = self.poll_interval;
        let shutdown = self.shutdown_tx.subscribe();

        *worker = Some(tokio::spawn(async move {
            poll_loop(store, sink, batch_size, poll_interval, shutdown).await;
        }));
    }

    /// Arrêt coopératif : interrompt l'attente en cours, laisse le claim
    /// en vol se terminer, puis joint la tâche.
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
        let handle = self.worker.lock().unwrap().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::error!("Outbox dispatcher worker join failed: {:?}", e);
            }
        }
    }

    /// Boucle au premier plan, pour les binaires qui ne veulent pas de
    /// tâche détachée.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) {
        poll_loop(
            Arc::clone(&self.store),
            Arc::clone(&self.sink),
            self.batch_size,
            self.poll_interval,
            shutdown,
        )
        .await;
    }

    /// Draine tout ce qui est en attente, lot après lot, et retourne le
    /// nombre cumulé de lignes publiées. Utilisé par les tests et les
    /// invocations one-shot.
    pub async fn process_once(&self) -> AppResult<usize> {
        let mut total = 0;
        loop {
            let processed =
                drain_batch(self.store.as_ref(), self.sink.as_ref(), self.batch_size).await?;
            if processed == 0 {
                return Ok(total);
            }
            total += processed;
        }
    }

    pub async fn stats(&self) -> AppResult<OutboxStats> {
        Ok(self.store.stats().await?)
    }

    /// Compacte l'historique : supprime les lignes publiées depuis plus
    /// de `older_than_days` jours. Les lignes en attente sont intouchées.
    pub async fn cleanup_published(&self, older_than_days: u32) -> AppResult<u64> {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(older_than_days));
        Ok(self.store.purge_published_before(cutoff).await?)
    }
}

async fn poll_loop<Store, Sink>(
    store: Arc<Store>,
    sink: Arc<Sink>,
    batch_size: u32,
    poll_interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    Store: OutboxStore,
    Sink: EventSink,
{
    tracing::info!(
        batch_size,
        poll_interval_ms = poll_interval.as_millis() as u64,
        "Outbox dispatcher started"
    );

    loop {
        if *shutdown.borrow() {
            break;
        }

        let processed = match drain_batch(store.as_ref(), sink.as_ref(), batch_size).await {
            Ok(count) => {
                if count > 0 {
                    tracing::info!("Relayed {} events", count);
                }
                count
            }
            Err(e) => {
                tracing::error!("Outbox dispatch error: {}", e);
                0
            }
        };

        // Lot complet : on reboucle immédiatement pour vider le backlog.
        // File vide ou erreur : on attend le prochain tick ou l'arrêt.
        if processed < batch_size as usize {
            tokio::select! {
                _ = sleep(poll_interval) => {}
                _ = shutdown.changed() => break,
            }
        }
    }

    tracing::info!("Outbox dispatcher stopped gracefully");
}

/// Un claim, publié en FIFO, tamponné puis commité. Au premier échec de
/// publication le claim est rendu et le lot entier sera retenté.
async fn drain_batch(
    store: &dyn OutboxStore,
    sink: &dyn EventSink,
    batch_size: u32,
) -> AppResult<usize> {
    let claim = store.claim_pending(batch_size).await?;
    let envelopes = claim.events().to_vec();

    if envelopes.is_empty() {
        claim.commit().await?;
        return Ok(0);
    }

    for envelope in &envelopes {
        if let Err(publish_err) = sink.publish(envelope).await {
            if let Err(abort_err) = claim.abort().await {
                tracing::error!("Failed to release outbox claim: {}", abort_err);
            }
            return Err(AppError::new(
                ErrorCode::InfrastructureFailure,
                format!("Sink rejected event {}: {}", envelope.id, publish_err),
            ));
        }
    }

    claim.commit().await?;
    Ok(envelopes.len())
}
