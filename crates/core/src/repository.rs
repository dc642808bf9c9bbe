//! Repository contract, instantiated once per entity type.
//!
//! Repositories upsert by identifier and never remove records: soft-deleted
//! entities stay retrievable by ID and appear in listings unless a predicate
//! excludes them.

use std::sync::Arc;

use crate::entity::Record;
use crate::error::DomainResult;
use crate::metadata::{Auditable, MultiTenant, Tenancy};

/// Persistent (or in-memory) collection of one entity type.
///
/// Implementations must tolerate concurrent callers.
pub trait Repository<E: Record>: Send + Sync {
    /// Insert or replace the entity stored under its identifier.
    fn save(&self, entity: &E) -> DomainResult<()>;

    /// Fails with `DomainError::NotFound` if nothing was ever saved under `id`.
    fn find_by_id(&self, id: &E::Id) -> DomainResult<E>;

    /// All entities matching `predicate`, in a deterministic order.
    fn list_where(&self, predicate: &dyn Fn(&E) -> bool) -> DomainResult<Vec<E>>;

    fn list(&self) -> DomainResult<Vec<E>> {
        self.list_where(&|_| true)
    }
}

impl<E, R> Repository<E> for Arc<R>
where
    E: Record,
    R: Repository<E> + ?Sized,
{
    fn save(&self, entity: &E) -> DomainResult<()> {
        (**self).save(entity)
    }

    fn find_by_id(&self, id: &E::Id) -> DomainResult<E> {
        (**self).find_by_id(id)
    }

    fn list_where(&self, predicate: &dyn Fn(&E) -> bool) -> DomainResult<Vec<E>> {
        (**self).list_where(predicate)
    }
}

/// Composable listing filter over the shared capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub tenancy: Option<Tenancy>,
    pub active_only: bool,
}

impl ListFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    pub fn in_tenancy(mut self, tenancy: Tenancy) -> Self {
        self.tenancy = Some(tenancy);
        self
    }

    pub fn matches<E: Auditable + MultiTenant>(&self, entity: &E) -> bool {
        if self.active_only && entity.is_deleted() {
            return false;
        }
        match &self.tenancy {
            Some(tenancy) => entity.belongs_to(tenancy),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::AuditTrail;
    use chrono::Utc;

    struct Doc {
        audit: AuditTrail,
        tenancy: Tenancy,
    }

    crate::impl_metadata!(Doc);

    fn doc(tenancy: &str) -> Doc {
        Doc {
            audit: AuditTrail::new(Utc::now()),
            tenancy: Tenancy::parse(tenancy).unwrap(),
        }
    }

    #[test]
    fn default_filter_keeps_deleted_records() {
        let mut d = doc("tenancy/a");
        d.delete();

        assert!(ListFilter::all().matches(&d));
        assert!(!ListFilter::active().matches(&d));
    }

    #[test]
    fn tenancy_filter_is_exact() {
        let d = doc("tenancy/a");
        let a = Tenancy::parse("tenancy/a").unwrap();
        let b = Tenancy::parse("tenancy/b").unwrap();

        assert!(ListFilter::all().in_tenancy(a).matches(&d));
        assert!(!ListFilter::all().in_tenancy(b).matches(&d));
    }
}
