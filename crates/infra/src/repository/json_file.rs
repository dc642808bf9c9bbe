use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use serde::de::DeserializeOwned;

use topics_core::{DomainResult, Record, Repository, RepositoryError};

use super::in_memory::Records;

/// Repository persisted as a JSON array in a single file.
///
/// The full collection is loaded on open and kept in memory. Every save
/// rewrites the file through a temporary sibling and a rename, so readers of
/// the file never see a half-written array.
#[derive(Debug)]
pub struct JsonFileRepository<E: Record> {
    path: PathBuf,
    inner: RwLock<Records<E>>,
}

impl<E> JsonFileRepository<E>
where
    E: Record + Serialize + DeserializeOwned,
{
    /// Open (or lazily create) the store at `path`.
    ///
    /// Every loaded record must satisfy the entity's invariants; a record
    /// that does not is reported as a serialization error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let entities: Vec<E> = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| RepositoryError::Serialization(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(RepositoryError::Io(format!("{}: {e}", path.display()))),
        };

        for entity in &entities {
            entity.validated().map_err(|violations| {
                RepositoryError::Serialization(format!(
                    "{}: invalid {} {}: {violations}",
                    path.display(),
                    E::KIND,
                    entity.id()
                ))
            })?;
        }

        tracing::debug!(path = %path.display(), records = entities.len(), kind = E::KIND, "opened json store");

        Ok(Self {
            path,
            inner: RwLock::new(Records::from_entities(entities)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &Records<E>) -> Result<(), RepositoryError> {
        let snapshot: Vec<&E> = records.ordered().collect();
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| RepositoryError::Io(format!("{}: {e}", parent.display())))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| RepositoryError::Io(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "failed to remove temporary store file");
            }
            RepositoryError::Io(format!("{}: {e}", self.path.display()))
        })
    }
}

impl<E> Repository<E> for JsonFileRepository<E>
where
    E: Record + Serialize + DeserializeOwned,
{
    fn save(&self, entity: &E) -> DomainResult<()> {
        let mut records = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;

        // Roll back the in-memory view if the write fails.
        let previous = records.get(entity.id()).ok();
        records.upsert(entity.clone());
        if let Err(e) = self.persist(&records) {
            match previous {
                Some(prev) => records.upsert(prev),
                None => records.remove(entity.id()),
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn find_by_id(&self, id: &E::Id) -> DomainResult<E> {
        let records = self.inner.read().map_err(|_| RepositoryError::Poisoned)?;
        records.get(id)
    }

    fn list_where(&self, predicate: &dyn Fn(&E) -> bool) -> DomainResult<Vec<E>> {
        let records = self.inner.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(records.ordered().filter(|e| predicate(e)).cloned().collect())
    }
}
