// backend/services/orders/api/src/main.rs

use orders_api::config::AppConfig;
use orders_api::routes;
use orders_api::state::AppState;
use shared_kernel::application::workers::OutboxDispatcher;
use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use shared_kernel::infrastructure::bootstrap::shutdown_signal;
use shared_kernel::infrastructure::postgres::PostgresOutboxStore;
use shared_kernel::infrastructure::postgres::factories::{PostgresConfig, create_postgres_pool};
use shared_kernel::infrastructure::postgres::utils::run_postgres_migrations;
use shared_kernel::infrastructure::sinks::NoopEventSink;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // La configuration se valide avant toute chose : une config
    // invalide interdit le démarrage, avec la liste des champs fautifs
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Invalid configuration: {}",
                serde_json::to_string_pretty(&e).unwrap_or_else(|_| e.to_string())
            );
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.tracing_directive())),
        )
        .init();

    if let Err(e) = run(config).await {
        tracing::error!("Fatal: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> AppResult<()> {
    let mut dispatcher = None;
    let mut pool = None;

    let state = if config.use_inmemory {
        tracing::info!("Wiring in-memory repositories and noop sink");
        let (state, _handles) = AppState::in_memory();
        state
    } else {
        let url = config.database_url.clone().ok_or_else(|| {
            AppError::new(ErrorCode::ValidationFailed, "DATABASE_URL must be set")
        })?;

        let pg_pool = create_postgres_pool(&PostgresConfig::new(url)).await?;
        run_postgres_migrations(&pg_pool)
            .await
            .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, e.to_string()))?;

        // Worker outbox en-process ; le binaire outbox-processor en
        // héberge d'autres si besoin
        let worker = Arc::new(OutboxDispatcher::new(
            Arc::new(PostgresOutboxStore::new(pg_pool.clone())),
            Arc::new(NoopEventSink::with_echo()),
            config.outbox_batch_size,
            Duration::from_millis(config.outbox_poll_interval_ms),
        ));
        worker.start();

        let state = AppState::postgres(pg_pool.clone());
        dispatcher = Some(worker);
        pool = Some(pg_pool);
        state
    };

    let app = routes::router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::new(
            ErrorCode::InfrastructureFailure,
            format!("Failed to bind {addr}: {e}"),
        )
    })?;

    tracing::info!(%addr, "orders API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, e.to_string()))?;

    // Arrêt ordonné : HTTP d'abord, puis le worker, puis le pool
    if let Some(worker) = dispatcher {
        worker.stop().await;
    }
    if let Some(pg_pool) = pool {
        pg_pool.close().await;
    }

    tracing::info!("orders API exited clean");
    Ok(())
}
