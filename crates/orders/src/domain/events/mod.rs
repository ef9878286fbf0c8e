mod order_event;

pub use order_event::OrderEvent;
