mod outbox_repository;
mod outbox_store;
mod outbox_stub;

pub use outbox_repository::OutboxRepository;
pub use outbox_store::{OutboxClaim, OutboxStats, OutboxStore};
pub use outbox_stub::InMemoryOutbox;
