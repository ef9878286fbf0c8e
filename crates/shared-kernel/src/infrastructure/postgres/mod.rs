// crates/shared-kernel/src/infrastructure/postgres/mod.rs

pub mod factories;
pub mod mappers;
pub mod rows;
pub mod transactions;
pub mod utils;

mod postgres_outbox_repository;
mod postgres_outbox_store;

pub use postgres_outbox_repository::PostgresOutboxRepository;
pub use postgres_outbox_store::PostgresOutboxStore;
