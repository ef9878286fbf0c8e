// crates/shared-kernel/src/domain/transaction/transaction_manager_stub.rs

use crate::domain::transaction::{FakeTransaction, Transaction, TransactionManager, TxClosure};
use crate::errors::Result;
use std::future::Future;
use std::pin::Pin;

/// Manager factice : exécute la closure sur une FakeTransaction.
/// Les repositories en mémoire ignorent la transaction de toute façon.
pub struct StubTxManager;

impl TransactionManager for StubTxManager {
    fn in_transaction<'a>(
        &'a self,
        f: TxClosure<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut tx = FakeTransaction;
            match f(&mut tx).await {
                Ok(()) => tx.commit().await,
                Err(e) => {
                    tx.rollback().await.ok();
                    Err(e)
                }
            }
        })
    }
}
