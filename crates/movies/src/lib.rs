//! Movies domain module.
//!
//! A movie owns the files holding its media. Files point back at their movie
//! by identifier only; nothing enforces that the movie exists.

pub mod file;
pub mod movie;
pub mod service;

pub use file::{File, FileConfig, FileId};
pub use movie::{Movie, MovieConfig, MovieId};
pub use service::{FileService, MovieService};
