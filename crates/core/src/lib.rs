//! `topics-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the audit/tenancy capabilities every entity carries,
//! validated configuration, and the repository contract.

pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod id;
pub mod metadata;
pub mod repository;

pub use config::{
    ConfigBuilder, ConfigOption, Configuration, FieldViolation, TenantConfig, Violations,
    WithTenancy, required, take, with_tenancy,
};
pub use context::{CancelHandle, Context};
pub use entity::{Entity, Record, Validate};
pub use error::{DomainError, DomainResult, RepositoryError};
pub use id::UserId;
pub use metadata::{AuditTrail, Auditable, MultiTenant, Tenancy};
pub use repository::{ListFilter, Repository};
