use chrono::Utc;
use serde::{Deserialize, Serialize};
use topics_core::{AuditTrail, Entity, Tenancy, Validate, Violations};

topics_core::string_id!(NoteId, "NoteId");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub tenancy: Tenancy,
    pub audit: AuditTrail,
}

impl Note {
    pub fn new(title: &str, tenancy: &str) -> Self {
        Self {
            id: NoteId::generate(),
            title: title.to_string(),
            tenancy: Tenancy::parse(tenancy).unwrap(),
            audit: AuditTrail::new(Utc::now()),
        }
    }
}

impl Entity for Note {
    type Id = NoteId;
    const KIND: &'static str = "note";

    fn id(&self) -> &NoteId {
        &self.id
    }
}

topics_core::impl_metadata!(Note);

impl Validate for Note {
    fn validate(&self, violations: &mut Violations) {
        violations.require("title", &self.title);
    }
}
