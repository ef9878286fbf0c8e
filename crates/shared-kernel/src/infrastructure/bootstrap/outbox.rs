// crates/shared-kernel/src/infrastructure/bootstrap/outbox.rs

use crate::application::workers::OutboxDispatcher;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::bootstrap::shutdown_signal;
use crate::infrastructure::postgres::factories::{PostgresConfig, create_postgres_pool};
use crate::infrastructure::postgres::utils::run_postgres_migrations;
use crate::infrastructure::postgres::PostgresOutboxStore;
use crate::infrastructure::sinks::NoopEventSink;
use std::env;
use std::sync::Arc;
use std::time::Duration;

/// Monte un relai outbox autonome : pool Postgres, store à claims,
/// sink et dispatcher, puis tourne jusqu'au signal d'arrêt.
pub async fn run_outbox_relay(domain_name: &str) -> AppResult<()> {
    // 1. Initialisation des logs
    tracing_subscriber::fmt::init();
    tracing::info!("Starting outbox relay for domain: {}", domain_name);

    // 2. Configuration via environnement (avec valeurs par défaut)
    let batch_size = env::var("OUTBOX_BATCH_SIZE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let interval_ms = env::var("OUTBOX_POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);

    // 3. Montage de l'infrastructure
    let pool = create_postgres_pool(&PostgresConfig::from_env()?).await?;
    run_postgres_migrations(&pool)
        .await
        .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, e.to_string()))?;

    let store = Arc::new(PostgresOutboxStore::new(pool.clone()));
    let sink = Arc::new(NoopEventSink::with_echo());
    let dispatcher = Arc::new(OutboxDispatcher::new(
        store,
        sink,
        batch_size,
        Duration::from_millis(interval_ms),
    ));

    tracing::info!(
        "Relay configured: batch_size={}, interval={}ms",
        batch_size,
        interval_ms
    );

    // 4. Exécution jusqu'au signal, puis arrêt coopératif
    dispatcher.start();
    shutdown_signal().await;
    dispatcher.stop().await;
    pool.close().await;

    tracing::info!("Outbox relay for {} exited clean", domain_name);
    Ok(())
}
