//! Validated, options-style entity construction.
//!
//! An entity is configured by applying a sequence of options to a mutable
//! configuration struct. Options either set a field or report a
//! [`FieldViolation`]; the builder keeps going and reports every violation
//! together instead of stopping at the first one. Only a fully valid
//! configuration is turned into an entity, and that is the moment the entity
//! receives its identifier and creation time.
//!
//! ```ignore
//! let movie = Movie::builder()
//!     .with(movie::with_title("John Wick"))
//!     .with(movie::with_uri("uri-example"))
//!     .with(with_tenancy("tenancy/test"))
//!     .build()?;
//! ```

use chrono::{DateTime, Utc};

use crate::error::{DomainError, DomainResult};
use crate::metadata::Tenancy;

/// A single invalid configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "must not be empty")
    }
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Accumulated violations, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Record a violation unless the field already has one.
    pub fn push(&mut self, violation: FieldViolation) {
        if !self.0.iter().any(|v| v.field == violation.field) {
            self.0.push(violation);
        }
    }

    /// Record a missing-field violation when `value` is blank.
    pub fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(FieldViolation::required(field));
        }
    }

    /// Record a missing-field violation when an option never set `value`.
    pub fn require_set<T>(&mut self, field: &'static str, value: &Option<T>) {
        if value.is_none() {
            self.push(FieldViolation::required(field));
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|v| v.field).collect()
    }

    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

impl From<FieldViolation> for Violations {
    fn from(violation: FieldViolation) -> Self {
        Self(vec![violation])
    }
}

impl From<FieldViolation> for DomainError {
    fn from(violation: FieldViolation) -> Self {
        DomainError::Validation(Violations::from(violation))
    }
}

impl core::fmt::Display for Violations {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (idx, v) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Mutable configuration from which an entity is constructed.
pub trait Configuration: Default {
    /// The entity produced by a valid configuration.
    type Output;

    /// Report fields that are still missing after all options were applied.
    fn check(&self, violations: &mut Violations);

    /// Build the entity. Only called when `check` reported nothing; a field
    /// that is still unusable here is reported as a violation.
    fn construct(self, now: DateTime<Utc>) -> Result<Self::Output, FieldViolation>;
}

/// A composable configuration option.
pub trait ConfigOption<C> {
    fn apply(self, config: &mut C) -> Result<(), FieldViolation>;
}

impl<C, F> ConfigOption<C> for F
where
    F: FnOnce(&mut C) -> Result<(), FieldViolation>,
{
    fn apply(self, config: &mut C) -> Result<(), FieldViolation> {
        self(config)
    }
}

/// Applies options and collects every violation before constructing.
#[derive(Debug, Default)]
pub struct ConfigBuilder<C> {
    config: C,
    violations: Violations,
}

impl<C: Configuration> ConfigBuilder<C> {
    pub fn new() -> Self {
        Self {
            config: C::default(),
            violations: Violations::default(),
        }
    }

    pub fn with(mut self, option: impl ConfigOption<C>) -> Self {
        if let Err(violation) = option.apply(&mut self.config) {
            self.violations.push(violation);
        }
        self
    }

    pub fn build(self) -> DomainResult<C::Output> {
        self.build_at(Utc::now())
    }

    pub fn build_at(self, now: DateTime<Utc>) -> DomainResult<C::Output> {
        let Self {
            config,
            mut violations,
        } = self;
        config.check(&mut violations);
        violations.into_result()?;
        config.construct(now).map_err(DomainError::from)
    }
}

/// Configurations that carry a tenancy.
pub trait TenantConfig {
    fn set_tenancy(&mut self, tenancy: Tenancy);
}

/// Option setting the owning tenancy of any tenant-scoped configuration.
#[derive(Debug, Clone)]
pub struct WithTenancy(String);

pub fn with_tenancy(tenancy: impl Into<String>) -> WithTenancy {
    WithTenancy(tenancy.into())
}

impl<C: TenantConfig> ConfigOption<C> for WithTenancy {
    fn apply(self, config: &mut C) -> Result<(), FieldViolation> {
        config.set_tenancy(Tenancy::parse(self.0)?);
        Ok(())
    }
}

/// Take a field that `check` already reported as required.
pub fn take<T>(field: &'static str, value: Option<T>) -> Result<T, FieldViolation> {
    value.ok_or_else(|| FieldViolation::required(field))
}

/// Reject blank input for a required field.
pub fn required(field: &'static str, value: impl Into<String>) -> Result<String, FieldViolation> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(FieldViolation::required(field));
    }
    Ok(value)
}
