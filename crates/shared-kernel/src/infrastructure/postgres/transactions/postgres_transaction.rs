// crates/shared-kernel/src/infrastructure/postgres/transactions/postgres_transaction.rs

use crate::domain::transaction::Transaction;
use crate::errors::{DomainError, Result};
use std::any::Any;
use std::future::Future;
use std::pin::Pin;

/// Wrapper concret autour d'une transaction sqlx. L'Option permet de
/// consommer la transaction au commit/rollback tout en gardant le trait
/// object-safe (&mut self).
pub struct PostgresTransaction {
    inner: Option<sqlx::Transaction<'static, sqlx::Postgres>>,
}

impl PostgresTransaction {
    pub fn new(tx: sqlx::Transaction<'static, sqlx::Postgres>) -> Self {
        Self { inner: Some(tx) }
    }

    pub fn get_mut(&mut self) -> Result<&mut sqlx::Transaction<'static, sqlx::Postgres>> {
        self.inner
            .as_mut()
            .ok_or_else(|| DomainError::Internal("Transaction already finished".into()))
    }
}

impl Transaction for PostgresTransaction {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn commit(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            match self.inner.take() {
                Some(tx) => tx.commit().await.map_err(|e| {
                    DomainError::Infrastructure(format!("Failed to commit transaction: {e}"))
                }),
                None => Err(DomainError::Internal(
                    "Transaction already finished".into(),
                )),
            }
        })
    }

    fn rollback(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            match self.inner.take() {
                Some(tx) => tx.rollback().await.map_err(|e| {
                    DomainError::Infrastructure(format!("Failed to roll back transaction: {e}"))
                }),
                None => Err(DomainError::Internal(
                    "Transaction already finished".into(),
                )),
            }
        })
    }
}
