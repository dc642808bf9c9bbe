use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{Auditable, Entity, MultiTenant};
use topics_events::Event;

use crate::user::{User, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistered {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub tenancy: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDeleted {
    pub id: UserId,
    pub tenancy: String,
    pub occurred_at: DateTime<Utc>,
}

/// Events emitted over a user's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UserEvent {
    Registered(UserRegistered),
    Deleted(UserDeleted),
}

impl UserEvent {
    pub fn registered(user: &User) -> Self {
        Self::Registered(UserRegistered {
            id: user.id().clone(),
            email: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            tenancy: user.tenancy().to_string(),
            occurred_at: user.created_at(),
        })
    }

    /// `None` while the user is still live.
    pub fn deleted(user: &User) -> Option<Self> {
        user.deleted_at().map(|at| {
            Self::Deleted(UserDeleted {
                id: user.id().clone(),
                tenancy: user.tenancy().to_string(),
                occurred_at: at,
            })
        })
    }
}

impl Event for UserEvent {
    fn event_type(&self) -> &'static str {
        match self {
            UserEvent::Registered(_) => "users.user.registered",
            UserEvent::Deleted(_) => "users.user.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            UserEvent::Registered(e) => e.occurred_at,
            UserEvent::Deleted(e) => e.occurred_at,
        }
    }
}
