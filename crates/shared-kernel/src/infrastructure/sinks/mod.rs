mod noop_event_sink;

pub use noop_event_sink::NoopEventSink;
