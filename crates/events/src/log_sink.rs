//! Tracing-backed event sink.
//!
//! Stand-in for a real broker: every published envelope becomes one
//! structured `info` record on the `topics::events` target.

use std::convert::Infallible;

use serde::Serialize;

use crate::bus::EventSink;
use crate::envelope::EventEnvelope;
use crate::event::Event;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl<E> EventSink<EventEnvelope<E>> for LogEventSink
where
    E: Event + Serialize,
{
    type Error = Infallible;

    fn publish(&self, envelope: EventEnvelope<E>) -> Result<(), Self::Error> {
        let payload = serde_json::to_string(envelope.payload())
            .unwrap_or_else(|e| format!("<unserializable: {e}>"));

        tracing::info!(
            target: "topics::events",
            event_id = %envelope.event_id(),
            event_type = envelope.event_type(),
            event_version = envelope.payload().version(),
            occurred_at = %envelope.payload().occurred_at(),
            tenancy = %envelope.tenancy(),
            entity_type = envelope.entity_type(),
            entity_id = envelope.entity_id(),
            payload = %payload,
            "event published"
        );

        Ok(())
    }
}
