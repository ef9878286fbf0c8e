mod postgres_config;

pub use postgres_config::{PostgresConfig, create_postgres_pool};
