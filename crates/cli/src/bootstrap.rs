//! Service wiring.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use topics_api::v1::{Files, Messages, Movies, Users};
use topics_core::{Record, Repository};
use topics_events::LogEventSink;
use topics_infra::{InMemoryRepository, JsonFileRepository};
use topics_messages::{Message, MessageService};
use topics_movies::{File, FileService, Movie, MovieService};
use topics_users::{User, UserService};

use crate::config::{AppConfig, StoreConfig};

/// Every service, type-erased behind its transport contract.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn Users>,
    pub movies: Arc<dyn Movies>,
    pub files: Arc<dyn Files>,
    pub messages: Arc<dyn Messages>,
}

impl core::fmt::Debug for Services {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

fn repository<E>(store: &StoreConfig, file_name: &str) -> anyhow::Result<Arc<dyn Repository<E>>>
where
    E: Record + Serialize + DeserializeOwned,
{
    let repo: Arc<dyn Repository<E>> = match store {
        StoreConfig::InMemory => Arc::new(InMemoryRepository::<E>::new()),
        StoreConfig::JsonDir(dir) => Arc::new(open_json::<E>(dir, file_name)?),
    };
    Ok(repo)
}

fn open_json<E>(dir: &Path, file_name: &str) -> anyhow::Result<JsonFileRepository<E>>
where
    E: Record + Serialize + DeserializeOwned,
{
    let path = dir.join(file_name);
    JsonFileRepository::open(&path)
        .map_err(|e| anyhow::anyhow!("opening {} store at {}: {e}", E::KIND, path.display()))
}

impl Services {
    pub fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let users = repository::<User>(&config.store, "users.json")?;
        let movies = repository::<Movie>(&config.store, "movies.json")?;
        let files = repository::<File>(&config.store, "files.json")?;
        let messages = repository::<Message>(&config.store, "messages.json")?;

        tracing::info!(store = ?config.store, tenancy = %config.tenancy, "services wired");

        Ok(Self {
            users: Arc::new(UserService::new(users, LogEventSink::new())),
            movies: Arc::new(MovieService::new(movies, files.clone())),
            files: Arc::new(FileService::new(files)),
            messages: Arc::new(MessageService::new(messages, config.tenancy.clone())),
        })
    }
}
