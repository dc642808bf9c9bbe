use serde::{Deserialize, Serialize};
use uuid::Uuid;

use topics_core::Tenancy;

use crate::event::Event;

/// Envelope for an event, containing tenancy + source entity metadata.
///
/// This is the unit handed to an [`EventSink`](crate::EventSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    tenancy: Tenancy,

    entity_id: String,
    entity_type: String,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        tenancy: Tenancy,
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        payload: E,
    ) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            tenancy,
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn tenancy(&self) -> &Tenancy {
        &self.tenancy
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E: Event> EventEnvelope<E> {
    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}
