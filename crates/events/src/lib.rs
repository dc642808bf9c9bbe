//! Domain events and the sinks they are published to.

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;
pub mod log_sink;

pub use bus::{EventBus, EventSink, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use log_sink::LogEventSink;
