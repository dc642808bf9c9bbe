use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{
    AuditTrail, ConfigBuilder, Configuration, Entity, FieldViolation, TenantConfig, Tenancy,
    Validate, Violations, required, take,
};

use crate::movie::MovieId;

topics_core::string_id!(
    /// File identifier.
    FileId,
    "FileId"
);

/// A stored media file belonging to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    id: FileId,
    /// Weak back-reference; resolve through the movie repository.
    movie_id: MovieId,
    uri: String,
    tenancy: Tenancy,
    audit: AuditTrail,
}

topics_core::impl_metadata!(File);

impl Entity for File {
    type Id = FileId;
    const KIND: &'static str = "file";

    fn id(&self) -> &FileId {
        &self.id
    }
}

impl Validate for File {
    fn validate(&self, violations: &mut Violations) {
        violations.require("uri", &self.uri);
    }
}

impl File {
    pub fn builder() -> ConfigBuilder<FileConfig> {
        ConfigBuilder::new()
    }

    pub fn movie_id(&self) -> &MovieId {
        &self.movie_id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[derive(Debug, Default)]
pub struct FileConfig {
    movie_id: Option<MovieId>,
    uri: String,
    tenancy: Option<Tenancy>,
}

impl Configuration for FileConfig {
    type Output = File;

    fn check(&self, violations: &mut Violations) {
        violations.require_set("movie_id", &self.movie_id);
        violations.require("uri", &self.uri);
        violations.require_set("tenancy", &self.tenancy);
    }

    fn construct(self, now: DateTime<Utc>) -> Result<File, FieldViolation> {
        Ok(File {
            id: FileId::generate(),
            movie_id: take("movie_id", self.movie_id)?,
            uri: self.uri,
            tenancy: take("tenancy", self.tenancy)?,
            audit: AuditTrail::new(now),
        })
    }
}

impl TenantConfig for FileConfig {
    fn set_tenancy(&mut self, tenancy: Tenancy) {
        self.tenancy = Some(tenancy);
    }
}

pub fn with_movie_id(movie_id: MovieId) -> impl FnOnce(&mut FileConfig) -> Result<(), FieldViolation> {
    move |cfg| {
        cfg.movie_id = Some(movie_id);
        Ok(())
    }
}

pub fn with_uri(uri: impl Into<String>) -> impl FnOnce(&mut FileConfig) -> Result<(), FieldViolation> {
    let uri = uri.into();
    move |cfg| {
        cfg.uri = required("uri", uri)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use topics_core::{Auditable, with_tenancy};

    use super::*;

    #[test]
    fn builds_a_file_for_a_movie() {
        let movie_id = MovieId::generate();
        let file = File::builder()
            .with(with_movie_id(movie_id.clone()))
            .with(with_uri("s3://bucket/john-wick.mp4"))
            .with(with_tenancy("tenancy/test"))
            .build()
            .unwrap();

        assert_eq!(file.movie_id(), &movie_id);
        assert_eq!(file.uri(), "s3://bucket/john-wick.mp4");
        assert!(!file.is_deleted());
    }

    #[test]
    fn movie_reference_is_required() {
        let err = File::builder()
            .with(with_uri(""))
            .with(with_tenancy("tenancy/test"))
            .build()
            .unwrap_err();

        assert_eq!(err.violations().unwrap().fields(), vec!["uri", "movie_id"]);
    }
}
