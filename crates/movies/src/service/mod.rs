//! Services orchestrating the movie aggregate.

pub mod file;
pub mod movie;

pub use file::FileService;
pub use movie::MovieService;

use topics_api::v1::{FileInfo, MovieInfo};
use topics_core::{Auditable, Entity, MultiTenant};

use crate::file::File;
use crate::movie::Movie;

impl From<&Movie> for MovieInfo {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id().to_string(),
            title: movie.title().to_string(),
            uri: movie.uri().to_string(),
            tenancy: movie.tenancy().to_string(),
            created_at: movie.created_at(),
            deleted_at: movie.deleted_at(),
        }
    }
}

impl From<&File> for FileInfo {
    fn from(file: &File) -> Self {
        Self {
            id: file.id().to_string(),
            movie_id: file.movie_id().to_string(),
            uri: file.uri().to_string(),
            tenancy: file.tenancy().to_string(),
            created_at: file.created_at(),
            deleted_at: file.deleted_at(),
        }
    }
}
