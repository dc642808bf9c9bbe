use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{Context, DomainResult};

use super::files::FileInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMovieRequest {
    pub title: String,
    pub uri: String,
    pub tenancy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMovieResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMovieRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMovieResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMovieRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMovieResponse {
    pub movie: MovieInfo,
}

/// Listing filter. The default lists every movie, deleted ones included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMoviesRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenancy: Option<String>,
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMoviesResponse {
    pub movies: Vec<MovieInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadMovieRequest {
    pub id: String,
}

/// Reference to the stored media; no bytes are transferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadMovieResponse {
    pub file: FileInfo,
}

/// Read view of a movie, including its deletion status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub id: String,
    pub title: String,
    pub uri: String,
    pub tenancy: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Movie aggregate operations (movie + its files).
pub trait Movies: Send + Sync {
    fn register_movie(
        &self,
        ctx: &Context,
        req: RegisterMovieRequest,
    ) -> DomainResult<RegisterMovieResponse>;

    fn delete_movie(&self, ctx: &Context, req: DeleteMovieRequest)
    -> DomainResult<DeleteMovieResponse>;

    fn get_movie(&self, ctx: &Context, req: GetMovieRequest) -> DomainResult<GetMovieResponse>;

    fn list_movies(&self, ctx: &Context, req: ListMoviesRequest)
    -> DomainResult<ListMoviesResponse>;

    fn download_movie(
        &self,
        ctx: &Context,
        req: DownloadMovieRequest,
    ) -> DomainResult<DownloadMovieResponse>;
}
