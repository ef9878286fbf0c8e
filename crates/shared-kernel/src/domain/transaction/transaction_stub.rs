// crates/shared-kernel/src/domain/transaction/transaction_stub.rs

use crate::domain::transaction::Transaction;
use crate::errors::Result;
use std::any::Any;
use std::future::Future;
use std::pin::Pin;

/// Transaction factice pour les tests et le câblage en mémoire
#[derive(Default)]
pub struct FakeTransaction;

impl Transaction for FakeTransaction {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn commit(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn rollback(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}
