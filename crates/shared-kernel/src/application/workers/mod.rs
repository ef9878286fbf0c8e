mod outbox_dispatcher;

#[cfg(test)]
mod outbox_dispatcher_test;

pub use outbox_dispatcher::OutboxDispatcher;
