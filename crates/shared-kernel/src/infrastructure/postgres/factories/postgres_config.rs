// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_config.rs

use crate::errors::{AppError, AppResult, ErrorCode};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl PostgresConfig {
    /// Valeurs par défaut du pool : 20 connexions, acquisition bornée à
    /// 5 s, connexion inactive recyclée après 30 s.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_env() -> AppResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::new(ErrorCode::ValidationFailed, "DATABASE_URL must be set"))?;

        let mut config = Self::new(url);

        if let Ok(raw) = std::env::var("DB_MAX_CONNECTIONS") {
            config.max_connections = raw.parse::<u32>().map_err(|_| {
                AppError::new(ErrorCode::ValidationFailed, "Invalid DB_MAX_CONNECTIONS")
            })?;
        }

        Ok(config)
    }
}

pub async fn create_postgres_pool(config: &PostgresConfig) -> AppResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| {
            AppError::new(
                ErrorCode::InfrastructureFailure,
                format!("Failed to connect to Postgres: {e}"),
            )
        })
}
