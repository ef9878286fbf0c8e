// crates/shared-kernel/src/infrastructure/postgres/transactions/postgres_transaction_manager.rs

use crate::domain::transaction::{Transaction, TransactionManager, TxClosure};
use crate::errors::Result;
use crate::infrastructure::postgres::mappers::SqlxErrorExt;
use crate::infrastructure::postgres::transactions::PostgresTransaction;
use sqlx::{Pool, Postgres};
use std::future::Future;
use std::pin::Pin;

pub struct PostgresTransactionManager {
    pool: Pool<Postgres>,
}

impl PostgresTransactionManager {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl TransactionManager for PostgresTransactionManager {
    fn in_transaction<'a>(
        &'a self,
        f: TxClosure<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let sqlx_tx = pool
                .begin()
                .await
                .map_domain_infra("Failed to begin transaction")?;
            let mut tx = PostgresTransaction::new(sqlx_tx);

            match f(&mut tx).await {
                Ok(()) => tx.commit().await,
                Err(e) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        tracing::warn!("Rollback failed after error: {}", rollback_err);
                    }
                    Err(e)
                }
            }
        })
    }
}
