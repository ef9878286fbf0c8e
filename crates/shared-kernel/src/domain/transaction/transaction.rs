// crates/shared-kernel/src/domain/transaction/transaction.rs

use crate::errors::Result;
use std::any::Any;
use std::future::Future;
use std::pin::Pin;

/// Transaction opaque vue du domaine. Les adaptateurs concrets se
/// récupèrent par downcast via `as_any_mut`.
pub trait Transaction: Send + Sync + Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn commit(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;

    fn rollback(&mut self) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}
