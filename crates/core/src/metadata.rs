//! Capabilities shared by every entity: audit timestamps and tenancy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::FieldViolation;

/// Opaque identifier (often a path) of the tenant that owns an entity.
///
/// Never blank, including when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenancy(String);

impl Tenancy {
    /// Parse a tenancy, rejecting blank input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldViolation> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(FieldViolation::required("tenancy"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Tenancy {
    type Error = FieldViolation;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<Tenancy> for String {
    fn from(tenancy: Tenancy) -> String {
        tenancy.0
    }
}

impl core::fmt::Display for Tenancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creation and soft-deletion timestamps embedded in every entity.
///
/// `created_at` is fixed at construction. `deleted_at` moves from `None` to
/// `Some` at most once and is never earlier than `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditTrail {
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl AuditTrail {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            deleted_at: None,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Record the deletion. Returns `false` if the trail was already deleted.
    pub fn mark_deleted(&mut self, now: DateTime<Utc>) -> bool {
        if self.deleted_at.is_some() {
            return false;
        }
        self.deleted_at = Some(now.max(self.created_at));
        true
    }
}

impl<'de> Deserialize<'de> for AuditTrail {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            created_at: DateTime<Utc>,
            #[serde(default)]
            deleted_at: Option<DateTime<Utc>>,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.deleted_at.is_some_and(|deleted| deleted < raw.created_at) {
            return Err(serde::de::Error::custom(FieldViolation::new(
                "deleted_at",
                "must not precede created_at",
            )));
        }
        Ok(Self {
            created_at: raw.created_at,
            deleted_at: raw.deleted_at,
        })
    }
}

/// Audit capability: creation time plus soft delete.
///
/// Implementors only expose their embedded [`AuditTrail`]; every other method
/// is derived from it.
pub trait Auditable {
    fn audit(&self) -> &AuditTrail;

    fn audit_mut(&mut self) -> &mut AuditTrail;

    fn created_at(&self) -> DateTime<Utc> {
        self.audit().created_at()
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.audit().deleted_at()
    }

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Soft delete. Idempotent: a second call keeps the first timestamp.
    fn delete(&mut self) -> bool {
        self.delete_at(Utc::now())
    }

    fn delete_at(&mut self, now: DateTime<Utc>) -> bool {
        self.audit_mut().mark_deleted(now)
    }
}

/// Tenancy capability.
pub trait MultiTenant {
    fn tenancy(&self) -> &Tenancy;

    fn belongs_to(&self, tenancy: &Tenancy) -> bool {
        self.tenancy() == tenancy
    }
}

/// Implement [`Auditable`] and [`MultiTenant`] for a struct embedding
/// `audit: AuditTrail` and `tenancy: Tenancy` fields.
#[macro_export]
macro_rules! impl_metadata {
    ($t:ty) => {
        impl $crate::metadata::Auditable for $t {
            fn audit(&self) -> &$crate::metadata::AuditTrail {
                &self.audit
            }

            fn audit_mut(&mut self) -> &mut $crate::metadata::AuditTrail {
                &mut self.audit
            }
        }

        impl $crate::metadata::MultiTenant for $t {
            fn tenancy(&self) -> &$crate::metadata::Tenancy {
                &self.tenancy
            }
        }
    };
}
