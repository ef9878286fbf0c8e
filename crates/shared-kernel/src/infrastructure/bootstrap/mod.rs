mod outbox;
mod signals;

pub use outbox::run_outbox_relay;
pub use signals::shutdown_signal;
