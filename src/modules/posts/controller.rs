use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use postboard_core::{AppError, ErrorBody};
use postboard_models::{PostInput, PostList, PostResponse};

use super::service::PostService;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List every post with its creator
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts, oldest first", body = PostList),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn get_posts(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
) -> Result<Json<PostList>, AppError> {
    let posts = PostService::list_posts(&state.store, ctx).await?;
    Ok(Json(posts))
}

/// Create a post owned by the caller
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostInput,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Malformed request body", body = ErrorBody),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 422, description = "Input invalid", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = PostService::create_post(&state.store, ctx, input).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Replace a post's title and content
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    request_body = PostInput,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Caller is not the creator", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 422, description = "Input invalid", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<Json<PostResponse>, AppError> {
    let post = PostService::update_post(&state.store, ctx, &id, input).await?;
    Ok(Json(post))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = String, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted", body = bool),
        (status = 401, description = "Not authenticated", body = ErrorBody),
        (status = 403, description = "Caller is not the creator", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(("bearer_auth" = [])),
    tag = "Posts"
)]
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthContext(ctx): AuthContext,
    Path(id): Path<String>,
) -> Result<Json<bool>, AppError> {
    let deleted = PostService::delete_post(&state.store, ctx, &id).await?;
    Ok(Json(deleted))
}
