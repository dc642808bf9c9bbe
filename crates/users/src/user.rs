use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{
    AuditTrail, ConfigBuilder, Configuration, Entity, FieldViolation, TenantConfig, Tenancy,
    Validate, Violations, take,
};

pub use topics_core::UserId;

/// A registered user.
///
/// # Invariants
/// - `email` is non-empty and contains `@`.
/// - `tenancy` is non-empty and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    tenancy: Tenancy,
    audit: AuditTrail,
}

topics_core::impl_metadata!(User);

impl Entity for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> &UserId {
        &self.id
    }
}

impl Validate for User {
    fn validate(&self, violations: &mut Violations) {
        if let Err(violation) = check_email(&self.email) {
            violations.push(violation);
        }
    }
}

impl User {
    pub fn builder() -> ConfigBuilder<UserConfig> {
        ConfigBuilder::new()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

#[derive(Debug, Default)]
pub struct UserConfig {
    email: String,
    first_name: String,
    last_name: String,
    tenancy: Option<Tenancy>,
}

impl Configuration for UserConfig {
    type Output = User;

    fn check(&self, violations: &mut Violations) {
        violations.require("email", &self.email);
        violations.require_set("tenancy", &self.tenancy);
    }

    fn construct(self, now: DateTime<Utc>) -> Result<User, FieldViolation> {
        Ok(User {
            id: UserId::generate(),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            tenancy: take("tenancy", self.tenancy)?,
            audit: AuditTrail::new(now),
        })
    }
}

impl TenantConfig for UserConfig {
    fn set_tenancy(&mut self, tenancy: Tenancy) {
        self.tenancy = Some(tenancy);
    }
}

fn check_email(email: &str) -> Result<(), FieldViolation> {
    if email.trim().is_empty() {
        return Err(FieldViolation::required("email"));
    }
    if !email.contains('@') {
        return Err(FieldViolation::new("email", "must contain '@'"));
    }
    Ok(())
}

pub fn with_email(
    email: impl Into<String>,
) -> impl FnOnce(&mut UserConfig) -> Result<(), FieldViolation> {
    let email = email.into();
    move |cfg| {
        check_email(&email)?;
        cfg.email = email;
        Ok(())
    }
}

pub fn with_first_name(
    first_name: impl Into<String>,
) -> impl FnOnce(&mut UserConfig) -> Result<(), FieldViolation> {
    let first_name = first_name.into();
    move |cfg| {
        cfg.first_name = first_name;
        Ok(())
    }
}

pub fn with_last_name(
    last_name: impl Into<String>,
) -> impl FnOnce(&mut UserConfig) -> Result<(), FieldViolation> {
    let last_name = last_name.into();
    move |cfg| {
        cfg.last_name = last_name;
        Ok(())
    }
}
