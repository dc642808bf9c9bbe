use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use topics_core::{Context, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesByMovieRequest {
    pub movie_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilesByMovieResponse {
    pub files: Vec<FileInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    pub movie_id: String,
    pub uri: String,
    pub tenancy: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

pub trait Files: Send + Sync {
    /// Files referencing `movie_id`. An unknown movie yields an empty list.
    fn list_files_by_movie(
        &self,
        ctx: &Context,
        req: ListFilesByMovieRequest,
    ) -> DomainResult<ListFilesByMovieResponse>;
}
