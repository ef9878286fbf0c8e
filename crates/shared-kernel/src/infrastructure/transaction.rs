// crates/shared-kernel/src/infrastructure/transaction.rs

use std::future::Future;
use std::pin::Pin;

use crate::domain::transaction::Transaction;
use crate::errors::{DomainError, Result};
use crate::infrastructure::postgres::transactions::PostgresTransaction;
use sqlx::{PgConnection, PgPool};

/// Extension pour récupérer la transaction sqlx concrète depuis le
/// trait object du domaine.
pub trait TransactionExt {
    fn downcast_mut_postgres(&mut self)
    -> Result<&mut sqlx::Transaction<'static, sqlx::Postgres>>;
}

impl TransactionExt for dyn Transaction + '_ {
    fn downcast_mut_postgres(
        &mut self,
    ) -> Result<&mut sqlx::Transaction<'static, sqlx::Postgres>> {
        self.as_any_mut()
            .downcast_mut::<PostgresTransaction>()
            .ok_or_else(|| {
                DomainError::Internal("Transaction type mismatch: expected Postgres".into())
            })?
            .get_mut()
    }
}

impl TransactionExt for &mut (dyn Transaction + '_) {
    fn downcast_mut_postgres(
        &mut self,
    ) -> Result<&mut sqlx::Transaction<'static, sqlx::Postgres>> {
        (**self).downcast_mut_postgres()
    }
}

impl dyn Transaction + '_ {
    /// Route une requête vers la transaction fournie, ou vers une
    /// connexion du pool quand il n'y en a pas. La connexion est rendue
    /// au pool sur tous les chemins de sortie.
    pub async fn execute_on<F, T>(
        pool: &PgPool,
        tx: Option<&mut dyn Transaction>,
        f: F,
    ) -> Result<T>
    where
        F: for<'c> FnOnce(
                &'c mut PgConnection,
            ) -> Pin<Box<dyn Future<Output = Result<T>> + Send + 'c>>
            + Send,
    {
        match tx {
            Some(t) => {
                let sqlx_tx = t.downcast_mut_postgres()?;
                f(&mut **sqlx_tx).await
            }
            None => {
                let mut conn = pool.acquire().await.map_err(|e| {
                    DomainError::Infrastructure(format!("Failed to acquire connection: {e}"))
                })?;
                f(&mut *conn).await
            }
        }
    }
}
