//! Demo flows exercising each service end to end.
//!
//! Each flow returns a JSON report of what the services answered.

use serde_json::{Value, json};

use topics_api::v1::{
    DeleteMessageRequest, DeleteMovieRequest, DeleteUserRequest, DownloadMovieRequest,
    GetMessagesRequest, GetMovieRequest, GetUserInfoRequest, ListFilesByMovieRequest,
    ListMoviesRequest, RegisterMovieRequest, RegisterUserRequest, SendMessageRequest,
};
use topics_core::{Context, Tenancy};

use crate::bootstrap::Services;
use crate::config::ScenarioKind;

pub fn run(
    services: &Services,
    ctx: &Context,
    tenancy: &Tenancy,
    kind: ScenarioKind,
) -> anyhow::Result<Value> {
    Ok(match kind {
        ScenarioKind::Movies => movies(services, ctx, tenancy)?,
        ScenarioKind::Users => users(services, ctx, tenancy)?,
        ScenarioKind::Messages => messages(services, ctx)?,
        ScenarioKind::All => json!({
            "movies": movies(services, ctx, tenancy)?,
            "users": users(services, ctx, tenancy)?,
            "messages": messages(services, ctx)?,
        }),
    })
}

/// Register, delete, inspect and download a movie, then list movies and files.
pub fn movies(services: &Services, ctx: &Context, tenancy: &Tenancy) -> anyhow::Result<Value> {
    let registered = services.movies.register_movie(
        ctx,
        RegisterMovieRequest {
            title: "John Wick".into(),
            uri: "uri-example".into(),
            tenancy: tenancy.to_string(),
        },
    )?;
    let id = registered.id;

    services
        .movies
        .delete_movie(ctx, DeleteMovieRequest { id: id.clone() })?;
    let movie = services
        .movies
        .get_movie(ctx, GetMovieRequest { id: id.clone() })?
        .movie;
    let download = services
        .movies
        .download_movie(ctx, DownloadMovieRequest { id: id.clone() })?;
    let listed = services.movies.list_movies(ctx, ListMoviesRequest::default())?;
    let files = services
        .files
        .list_files_by_movie(ctx, ListFilesByMovieRequest { movie_id: id })?;

    Ok(json!({
        "movie": movie,
        "download": download.file,
        "movies": listed.movies,
        "files": files.files,
    }))
}

/// Register a user, delete it and read it back.
pub fn users(services: &Services, ctx: &Context, tenancy: &Tenancy) -> anyhow::Result<Value> {
    let registered = services.users.register_user(
        ctx,
        RegisterUserRequest {
            email: "john@doe.com".into(),
            first_name: "john".into(),
            last_name: "doe".into(),
            tenancy: tenancy.to_string(),
        },
    )?;

    services.users.delete_user(
        ctx,
        DeleteUserRequest {
            id: registered.id.clone(),
        },
    )?;
    let info = services
        .users
        .get_user_info(ctx, GetUserInfoRequest { id: registered.id })?;

    Ok(json!({ "user": info }))
}

/// Post two messages, delete the first and read the channel history.
pub fn messages(services: &Services, ctx: &Context) -> anyhow::Result<Value> {
    let channel_id = "general".to_string();
    let first = services.messages.send_message(
        ctx,
        SendMessageRequest {
            author_id: "john".into(),
            channel_id: channel_id.clone(),
            content: "hello".into(),
            tenancy: None,
        },
    )?;
    services.messages.send_message(
        ctx,
        SendMessageRequest {
            author_id: "jane".into(),
            channel_id: channel_id.clone(),
            content: "hi john".into(),
            tenancy: None,
        },
    )?;

    services
        .messages
        .delete_message(ctx, DeleteMessageRequest { id: first.id })?;
    let history = services
        .messages
        .get_messages(ctx, GetMessagesRequest { channel_id })?;

    Ok(json!({ "messages": history.messages }))
}
