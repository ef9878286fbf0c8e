// crates/shared-kernel/src/infrastructure/mod.rs

pub mod bootstrap;
pub mod postgres;
pub mod sinks;
mod transaction;

pub use transaction::TransactionExt;
