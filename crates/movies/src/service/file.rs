use std::str::FromStr;

use topics_api::v1::{FileInfo, Files, ListFilesByMovieRequest, ListFilesByMovieResponse};
use topics_core::{Context, DomainResult, Repository};

use crate::file::File;
use crate::movie::MovieId;

/// Read-side access to movie files.
#[derive(Debug)]
pub struct FileService<F> {
    files: F,
}

impl<F: Repository<File>> FileService<F> {
    pub fn new(files: F) -> Self {
        Self { files }
    }
}

/// Every file referencing `movie_id`, deleted ones included.
pub(crate) fn files_of<F: Repository<File>>(files: &F, movie_id: &MovieId) -> DomainResult<Vec<File>> {
    files.list_where(&|f: &File| f.movie_id() == movie_id)
}

impl<F: Repository<File>> Files for FileService<F> {
    fn list_files_by_movie(
        &self,
        ctx: &Context,
        req: ListFilesByMovieRequest,
    ) -> DomainResult<ListFilesByMovieResponse> {
        ctx.ensure_active()?;
        let movie_id = MovieId::from_str(&req.movie_id)?;

        let files = files_of(&self.files, &movie_id)?;
        tracing::debug!(movie_id = %movie_id, count = files.len(), "listed files by movie");

        Ok(ListFilesByMovieResponse {
            files: files.iter().map(FileInfo::from).collect(),
        })
    }
}
