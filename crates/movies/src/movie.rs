use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{
    AuditTrail, ConfigBuilder, Configuration, Entity, FieldViolation, TenantConfig, Tenancy,
    Validate, Violations, required, take,
};

topics_core::string_id!(
    /// Movie identifier.
    MovieId,
    "MovieId"
);

/// A registered movie.
///
/// # Invariants
/// - `title` and `uri` are non-empty.
/// - `tenancy` is non-empty and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    id: MovieId,
    title: String,
    uri: String,
    tenancy: Tenancy,
    audit: AuditTrail,
}

topics_core::impl_metadata!(Movie);

impl Entity for Movie {
    type Id = MovieId;
    const KIND: &'static str = "movie";

    fn id(&self) -> &MovieId {
        &self.id
    }
}

impl Validate for Movie {
    fn validate(&self, violations: &mut Violations) {
        violations.require("title", &self.title);
        violations.require("uri", &self.uri);
    }
}

impl Movie {
    pub fn builder() -> ConfigBuilder<MovieConfig> {
        ConfigBuilder::new()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Reference to the underlying media.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Debug, Default)]
pub struct MovieConfig {
    title: String,
    uri: String,
    tenancy: Option<Tenancy>,
}

impl Configuration for MovieConfig {
    type Output = Movie;

    fn check(&self, violations: &mut Violations) {
        violations.require("title", &self.title);
        violations.require("uri", &self.uri);
        violations.require_set("tenancy", &self.tenancy);
    }

    fn construct(self, now: DateTime<Utc>) -> Result<Movie, FieldViolation> {
        Ok(Movie {
            id: MovieId::generate(),
            title: self.title,
            uri: self.uri,
            tenancy: take("tenancy", self.tenancy)?,
            audit: AuditTrail::new(now),
        })
    }
}

impl TenantConfig for MovieConfig {
    fn set_tenancy(&mut self, tenancy: Tenancy) {
        self.tenancy = Some(tenancy);
    }
}

pub fn with_title(
    title: impl Into<String>,
) -> impl FnOnce(&mut MovieConfig) -> Result<(), FieldViolation> {
    let title = title.into();
    move |cfg| {
        cfg.title = required("title", title)?;
        Ok(())
    }
}

pub fn with_uri(uri: impl Into<String>) -> impl FnOnce(&mut MovieConfig) -> Result<(), FieldViolation> {
    let uri = uri.into();
    move |cfg| {
        cfg.uri = required("uri", uri)?;
        Ok(())
    }
}
