// crates/shared-kernel/src/domain/transaction/transaction_manager.rs

use crate::domain::transaction::Transaction;
use crate::errors::Result;
use std::future::Future;
use std::pin::Pin;

pub type TxFuture<'t> = Pin<Box<dyn Future<Output = Result<()>> + Send + 't>>;

pub type TxClosure<'a> =
    Box<dyn for<'t> FnOnce(&'t mut dyn Transaction) -> TxFuture<'t> + Send + 'a>;

/// Ouvre une transaction, exécute la closure, puis commit si elle a réussi
/// et rollback sinon. La closure ne gère jamais le commit elle-même.
pub trait TransactionManager: Send + Sync {
    fn in_transaction<'a>(
        &'a self,
        f: TxClosure<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}
