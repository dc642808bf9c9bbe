//! Infrastructure adapters: concrete repository backends.

pub mod repository;

pub use repository::{InMemoryRepository, JsonFileRepository};

#[cfg(test)]
pub(crate) mod test_support;
