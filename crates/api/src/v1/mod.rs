//! Version 1 of the topics service contracts.

pub mod files;
pub mod messages;
pub mod movies;
pub mod users;

pub use files::{FileInfo, Files, ListFilesByMovieRequest, ListFilesByMovieResponse};
pub use messages::{
    DeleteMessageRequest, DeleteMessageResponse, GetMessagesRequest, GetMessagesResponse,
    MessageInfo, Messages, SendMessageRequest, SendMessageResponse,
};
pub use movies::{
    DeleteMovieRequest, DeleteMovieResponse, DownloadMovieRequest, DownloadMovieResponse,
    GetMovieRequest, GetMovieResponse, ListMoviesRequest, ListMoviesResponse, MovieInfo, Movies,
    RegisterMovieRequest, RegisterMovieResponse,
};
pub use users::{
    DeleteUserRequest, DeleteUserResponse, GetUserInfoRequest, GetUserInfoResponse,
    RegisterUserRequest, RegisterUserResponse, Users,
};
