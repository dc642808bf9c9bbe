//! Entity trait: identity + continuity across state changes.

use crate::config::Violations;
use crate::metadata::{Auditable, MultiTenant};

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone
        + Eq
        + core::hash::Hash
        + core::fmt::Debug
        + core::fmt::Display
        + Send
        + Sync
        + 'static;

    /// Human-readable kind used in error messages (e.g. "movie").
    const KIND: &'static str;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Field invariants of a constructed entity.
///
/// Builders enforce these before an entity exists; stores that load records
/// from outside the process re-check them.
pub trait Validate {
    fn validate(&self, violations: &mut Violations);

    fn validated(&self) -> Result<(), Violations> {
        let mut violations = Violations::default();
        self.validate(&mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Everything a repository needs to store an entity.
pub trait Record: Entity + Validate + Auditable + MultiTenant + Clone + Send + Sync + 'static {}

impl<T> Record for T where
    T: Entity + Validate + Auditable + MultiTenant + Clone + Send + Sync + 'static
{
}
