use std::collections::HashMap;
use std::sync::RwLock;

use topics_core::{DomainError, DomainResult, Record, Repository, RepositoryError};

/// Records keyed by ID, remembering first-insertion order.
#[derive(Debug)]
pub(crate) struct Records<E: Record> {
    order: Vec<E::Id>,
    by_id: HashMap<E::Id, E>,
}

impl<E: Record> Default for Records<E> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<E: Record> Records<E> {
    pub(crate) fn from_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let mut records = Self::default();
        for entity in entities {
            records.upsert(entity);
        }
        records
    }

    /// Replacing an entity keeps its original position.
    pub(crate) fn upsert(&mut self, entity: E) {
        let id = entity.id().clone();
        if self.by_id.insert(id.clone(), entity).is_none() {
            self.order.push(id);
        }
    }

    pub(crate) fn remove(&mut self, id: &E::Id) {
        if self.by_id.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
        }
    }

    pub(crate) fn get(&self, id: &E::Id) -> DomainResult<E> {
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    pub(crate) fn ordered(&self) -> impl Iterator<Item = &E> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}

/// In-memory repository for tests/dev.
///
/// Reads share the lock; saves take it exclusively.
#[derive(Debug)]
pub struct InMemoryRepository<E: Record> {
    inner: RwLock<Records<E>>,
}

impl<E: Record> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Records::default()),
        }
    }

    pub fn len(&self) -> DomainResult<usize> {
        let records = self.inner.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<E: Record> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> Repository<E> for InMemoryRepository<E> {
    fn save(&self, entity: &E) -> DomainResult<()> {
        let mut records = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;
        records.upsert(entity.clone());
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use topics_core::{Auditable, Entity, ListFilter};

    use super::*;
    use crate::test_support::{Note, NoteId};

    #[test]
    fn save_then_find_round_trips() {
        let repo = InMemoryRepository::<Note>::new();
        let note = Note::new("hello", "tenancy/a");

        repo.save(&note).unwrap();

        assert_eq!(repo.find_by_id(note.id()).unwrap(), note);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let repo = InMemoryRepository::<Note>::new();
        let err = repo.find_by_id(&NoteId::generate()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn deleted_entities_are_still_found_and_listed() {
        let repo = InMemoryRepository::<Note>::new();
        let mut note = Note::new("hello", "tenancy/a");
        repo.save(&note).unwrap();

        note.delete();
        repo.save(&note).unwrap();

        assert!(repo.find_by_id(note.id()).unwrap().is_deleted());
        assert_eq!(repo.list().unwrap().len(), 1);
        assert!(repo.list_where(&|n| ListFilter::active().matches(n)).unwrap().is_empty());
    }

    #[test]
    fn listing_keeps_first_insertion_order() {
        let repo = InMemoryRepository::<Note>::new();
        let a = Note::new("a", "t");
        let b = Note::new("b", "t");
        let c = Note::new("c", "t");
        for n in [&a, &b, &c] {
            repo.save(n).unwrap();
        }
        // Re-saving does not move the record.
        repo.save(&a).unwrap();

        let titles: Vec<_> = repo.list().unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert_eq!(repo.len().unwrap(), 3);
    }

    #[test]
    fn concurrent_saves_do_not_lose_records() {
        let repo = Arc::new(InMemoryRepository::<Note>::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let note = Note::new(&format!("{t}-{i}"), "tenancy/a");
                        repo.save(&note).unwrap();
                        repo.find_by_id(note.id()).unwrap();
                        repo.list().unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(repo.len().unwrap(), 400);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let repo = Arc::new(InMemoryRepository::<Note>::new());
        let poisoner = repo.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(
            repo.len(),
            Err(DomainError::Repository(RepositoryError::Poisoned))
        ));
        assert!(repo.save(&Note::new("x", "t")).is_err());
    }
}
