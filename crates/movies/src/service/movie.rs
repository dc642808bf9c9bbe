use std::str::FromStr;

use topics_api::v1::{
    DeleteMovieRequest, DeleteMovieResponse, DownloadMovieRequest, DownloadMovieResponse,
    FileInfo, GetMovieRequest, GetMovieResponse, ListMoviesRequest, ListMoviesResponse, MovieInfo,
    Movies, RegisterMovieRequest, RegisterMovieResponse,
};
use topics_core::{
    Auditable, Context, DomainError, DomainResult, Entity, ListFilter, MultiTenant, Repository,
    Tenancy, with_tenancy,
};

use crate::file::{self, File};
use crate::movie::{self, Movie, MovieId};
use crate::service::file::files_of;

/// Coordinates movies and the files holding their media.
#[derive(Debug)]
pub struct MovieService<M, F> {
    movies: M,
    files: F,
}

impl<M, F> MovieService<M, F>
where
    M: Repository<Movie>,
    F: Repository<File>,
{
    pub fn new(movies: M, files: F) -> Self {
        Self { movies, files }
    }

    fn load(&self, raw_id: &str) -> DomainResult<Movie> {
        let id = MovieId::from_str(raw_id)?;
        self.movies.find_by_id(&id)
    }
}

impl<M, F> Movies for MovieService<M, F>
where
    M: Repository<Movie>,
    F: Repository<File>,
{
    /// Registers the movie and the file holding its media.
    ///
    /// Both entities are validated before anything is written; the movie is
    /// saved first, so a failed file save leaves a movie without media.
    fn register_movie(
        &self,
        ctx: &Context,
        req: RegisterMovieRequest,
    ) -> DomainResult<RegisterMovieResponse> {
        ctx.ensure_active()?;
        tracing::debug!(title = %req.title, tenancy = %req.tenancy, "registering movie");

        let movie = Movie::builder()
            .with(movie::with_title(req.title))
            .with(movie::with_uri(req.uri.clone()))
            .with(with_tenancy(req.tenancy.clone()))
            .build()?;

        let media = File::builder()
            .with(file::with_movie_id(movie.id().clone()))
            .with(file::with_uri(req.uri))
            .with(with_tenancy(req.tenancy))
            .build()?;

        self.movies.save(&movie)?;
        self.files.save(&media)?;

        tracing::info!(
            movie_id = %movie.id(),
            file_id = %media.id(),
            tenancy = %movie.tenancy(),
            "movie registered"
        );
        Ok(RegisterMovieResponse {
            id: movie.id().to_string(),
        })
    }

    fn delete_movie(
        &self,
        ctx: &Context,
        req: DeleteMovieRequest,
    ) -> DomainResult<DeleteMovieResponse> {
        ctx.ensure_active()?;
        let mut movie = self.load(&req.id)?;

        if !movie.delete() {
            tracing::debug!(movie_id = %movie.id(), "movie already deleted");
            return Ok(DeleteMovieResponse {});
        }
        self.movies.save(&movie)?;

        tracing::info!(movie_id = %movie.id(), "movie deleted");
        Ok(DeleteMovieResponse {})
    }

    fn get_movie(&self, ctx: &Context, req: GetMovieRequest) -> DomainResult<GetMovieResponse> {
        ctx.ensure_active()?;
        let movie = self.load(&req.id)?;
        Ok(GetMovieResponse {
            movie: MovieInfo::from(&movie),
        })
    }

    fn list_movies(
        &self,
        ctx: &Context,
        req: ListMoviesRequest,
    ) -> DomainResult<ListMoviesResponse> {
        ctx.ensure_active()?;

        let mut filter = ListFilter {
            active_only: req.active_only,
            ..ListFilter::all()
        };
        if let Some(raw) = req.tenancy {
            filter = filter.in_tenancy(Tenancy::parse(raw)?);
        }

        let movies = self.movies.list_where(&|m: &Movie| filter.matches(m))?;
        tracing::debug!(count = movies.len(), "listed movies");

        Ok(ListMoviesResponse {
            movies: movies.iter().map(MovieInfo::from).collect(),
        })
    }

    /// Resolves the media reference of a movie (deleted movies included).
    fn download_movie(
        &self,
        ctx: &Context,
        req: DownloadMovieRequest,
    ) -> DomainResult<DownloadMovieResponse> {
        ctx.ensure_active()?;
        let movie = self.load(&req.id)?;

        let media = files_of(&self.files, movie.id())?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found(File::KIND, format!("movie {}", movie.id())))?;

        tracing::debug!(movie_id = %movie.id(), file_id = %media.id(), "resolved movie media");
        Ok(DownloadMovieResponse {
            file: FileInfo::from(&media),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use topics_api::v1::{Files, ListFilesByMovieRequest};
    use topics_core::RepositoryError;
    use topics_infra::InMemoryRepository;

    use super::*;
    use crate::service::FileService;

    type MovieRepo = Arc<InMemoryRepository<Movie>>;
    type FileRepo = Arc<InMemoryRepository<File>>;

    fn setup() -> (MovieService<MovieRepo, FileRepo>, MovieRepo, FileRepo) {
        let movies: MovieRepo = Arc::new(InMemoryRepository::new());
        let files: FileRepo = Arc::new(InMemoryRepository::new());
        (MovieService::new(movies.clone(), files.clone()), movies, files)
    }

    fn john_wick() -> RegisterMovieRequest {
        RegisterMovieRequest {
            title: "John Wick".into(),
            uri: "uri-example".into(),
            tenancy: "tenancy/test".into(),
        }
    }

    #[test]
    fn register_get_delete_get() {
        let (svc, _, _) = setup();
        let ctx = Context::background();

        let id = svc.register_movie(&ctx, john_wick()).unwrap().id;
        assert!(!id.is_empty());

        let live = svc.get_movie(&ctx, GetMovieRequest { id: id.clone() }).unwrap().movie;
        assert_eq!(live.title, "John Wick");
        assert_eq!(live.deleted_at, None);

        svc.delete_movie(&ctx, DeleteMovieRequest { id: id.clone() }).unwrap();

        let gone = svc.get_movie(&ctx, GetMovieRequest { id }).unwrap().movie;
        assert_eq!(gone.title, "John Wick");
        assert!(gone.deleted_at.unwrap() >= gone.created_at);
        assert_eq!(gone.created_at, live.created_at);
    }

    #[test]
    fn registration_stores_the_media_file() {
        let (svc, movies, files) = setup();
        let ctx = Context::background();

        let id = svc.register_movie(&ctx, john_wick()).unwrap().id;

        assert_eq!(movies.len().unwrap(), 1);
        let stored = files.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].movie_id().as_str(), id);
        assert_eq!(stored[0].uri(), "uri-example");

        let listed = FileService::new(files)
            .list_files_by_movie(&ctx, ListFilesByMovieRequest { movie_id: id })
            .unwrap();
        assert_eq!(listed.files.len(), 1);
    }

    #[test]
    fn invalid_registration_writes_nothing() {
        let (svc, movies, files) = setup();
        let req = RegisterMovieRequest {
            title: String::new(),
            uri: String::new(),
            tenancy: String::new(),
        };

        let err = svc.register_movie(&Context::background(), req).unwrap_err();

        assert_eq!(
            err.violations().unwrap().fields(),
            vec!["title", "uri", "tenancy"]
        );
        assert!(movies.is_empty().unwrap());
        assert!(files.is_empty().unwrap());
    }

    #[test]
    fn deleting_twice_keeps_the_first_timestamp() {
        let (svc, _, _) = setup();
        let ctx = Context::background();
        let id = svc.register_movie(&ctx, john_wick()).unwrap().id;

        svc.delete_movie(&ctx, DeleteMovieRequest { id: id.clone() }).unwrap();
        let first = svc.get_movie(&ctx, GetMovieRequest { id: id.clone() }).unwrap();
        svc.delete_movie(&ctx, DeleteMovieRequest { id: id.clone() }).unwrap();
        let second = svc.get_movie(&ctx, GetMovieRequest { id }).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_movie_is_not_found() {
        let (svc, _, _) = setup();
        let ctx = Context::background();
        let id = MovieId::generate().to_string();

        assert!(svc.get_movie(&ctx, GetMovieRequest { id: id.clone() }).unwrap_err().is_not_found());
        assert!(svc.delete_movie(&ctx, DeleteMovieRequest { id: id.clone() }).unwrap_err().is_not_found());
        assert!(svc.download_movie(&ctx, DownloadMovieRequest { id }).unwrap_err().is_not_found());
    }

    #[test]
    fn listing_exposes_deleted_movies_unless_filtered() {
        let (svc, _, _) = setup();
        let ctx = Context::background();
        let kept = svc.register_movie(&ctx, john_wick()).unwrap().id;
        let gone = svc.register_movie(&ctx, john_wick()).unwrap().id;
        let elsewhere = svc
            .register_movie(
                &ctx,
                RegisterMovieRequest {
                    tenancy: "tenancy/other".into(),
                    ..john_wick()
                },
            )
            .unwrap()
            .id;
        svc.delete_movie(&ctx, DeleteMovieRequest { id: gone.clone() }).unwrap();

        let ids = |req: ListMoviesRequest| -> Vec<String> {
            svc.list_movies(&ctx, req)
                .unwrap()
                .movies
                .into_iter()
                .map(|m| m.id)
                .collect()
        };

        assert_eq!(ids(ListMoviesRequest::default()), vec![kept.clone(), gone.clone(), elsewhere]);
        assert_eq!(
            ids(ListMoviesRequest {
                tenancy: Some("tenancy/test".into()),
                active_only: true,
            }),
            vec![kept]
        );
    }

    #[test]
    fn blank_tenancy_filter_is_a_validation_error() {
        let (svc, _, _) = setup();
        let err = svc
            .list_movies(
                &Context::background(),
                ListMoviesRequest {
                    tenancy: Some(" ".into()),
                    active_only: false,
                },
            )
            .unwrap_err();
        assert_eq!(err.violations().unwrap().fields(), vec!["tenancy"]);
    }

    #[test]
    fn deleted_movies_can_still_be_downloaded() {
        let (svc, _, _) = setup();
        let ctx = Context::background();
        let id = svc.register_movie(&ctx, john_wick()).unwrap().id;
        svc.delete_movie(&ctx, DeleteMovieRequest { id: id.clone() }).unwrap();

        let res = svc.download_movie(&ctx, DownloadMovieRequest { id: id.clone() }).unwrap();

        assert_eq!(res.file.movie_id, id);
        assert_eq!(res.file.uri, "uri-example");
    }

    #[test]
    fn download_without_media_is_not_found() {
        let (svc, movies, _) = setup();
        let movie = Movie::builder()
            .with(movie::with_title("Orphan"))
            .with(movie::with_uri("nowhere"))
            .with(with_tenancy("tenancy/test"))
            .build()
            .unwrap();
        movies.save(&movie).unwrap();

        let err = svc
            .download_movie(
                &Context::background(),
                DownloadMovieRequest {
                    id: movie.id().to_string(),
                },
            )
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { kind: "file", .. }));
    }

    struct FailingFiles;

    impl Repository<File> for FailingFiles {
        fn save(&self, _: &File) -> DomainResult<()> {
            Err(RepositoryError::Io("read-only".into()).into())
        }

        fn find_by_id(&self, id: &crate::file::FileId) -> DomainResult<File> {
            Err(DomainError::not_found(File::KIND, id))
        }

        fn list_where(&self, _: &dyn Fn(&File) -> bool) -> DomainResult<Vec<File>> {
            Err(RepositoryError::Poisoned.into())
        }
    }

    #[test]
    fn file_repository_failures_propagate() {
        let movies: MovieRepo = Arc::new(InMemoryRepository::new());
        let svc = MovieService::new(movies.clone(), FailingFiles);
        let ctx = Context::background();

        let err = svc.register_movie(&ctx, john_wick()).unwrap_err();
        assert_eq!(err, DomainError::Repository(RepositoryError::Io("read-only".into())));

        // The movie was written before the file save failed.
        let id = movies.list().unwrap()[0].id().to_string();
        let err = svc.download_movie(&ctx, DownloadMovieRequest { id }).unwrap_err();
        assert_eq!(err, DomainError::Repository(RepositoryError::Poisoned));
    }

    #[test]
    fn cancelled_context_is_honoured() {
        let (svc, movies, _) = setup();
        let (ctx, handle) = Context::with_cancel();
        handle.cancel();

        assert_eq!(svc.register_movie(&ctx, john_wick()).unwrap_err(), DomainError::Cancelled);
        assert_eq!(
            svc.list_movies(&ctx, ListMoviesRequest::default()).unwrap_err(),
            DomainError::Cancelled
        );
        assert!(movies.is_empty().unwrap());
    }
}
