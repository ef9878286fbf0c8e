mod event_sink;

pub use event_sink::EventSink;
