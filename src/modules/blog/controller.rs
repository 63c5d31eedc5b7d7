use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use tracing::instrument;

use crate::middleware::auth::{RequireBlogCreate, RequireBlogDelete, RequireBlogUpdate};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::services::model::CreatedResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{BlogInput, BlogResponse, BlogsListResponse, ListBlogsParams};
use super::service::BlogService;

/// List published posts
#[utoipa::path(
    get,
    path = "/v1/blog",
    params(
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("author" = Option<String>, Query, description = "Filter by author"),
        ("tags" = Option<String>, Query, description = "Comma-separated tags, any-match"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of published posts", body = BlogsListResponse),
        (status = 400, description = "Conflicting pagination parameters or bad token", body = ErrorResponse)
    ),
    tag = "Blog"
)]
#[instrument(skip(state))]
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(params): Query<ListBlogsParams>,
) -> Result<Json<BlogsListResponse>, AppError> {
    let (blogs, pagination) = BlogService::list(state.store.as_ref(), params).await?;
    Ok(Json(BlogsListResponse {
        success: true,
        blogs,
        pagination,
    }))
}

/// Fetch one published post
#[utoipa::path(
    get,
    path = "/v1/blog/{id}",
    params(("id" = String, Path, description = "Blog document id")),
    responses(
        (status = 200, description = "The post", body = BlogResponse),
        (status = 404, description = "Post missing or unpublished", body = ErrorResponse)
    ),
    tag = "Blog"
)]
#[instrument(skip(state))]
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    let blog = BlogService::get_published(state.store.as_ref(), &id).await?;
    Ok(Json(BlogResponse {
        success: true,
        blog,
    }))
}

/// Create a post
#[utoipa::path(
    post,
    path = "/v1/blog",
    request_body = BlogInput,
    responses(
        (status = 201, description = "Post created", body = CreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
#[instrument(skip(state, auth_user))]
pub async fn create_blog(
    State(state): State<AppState>,
    RequireBlogCreate(auth_user): RequireBlogCreate,
    ValidatedJson(input): ValidatedJson<BlogInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = BlogService::create(state.store.as_ref(), input, &auth_user.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id,
            message: "Blog created successfully".to_string(),
        }),
    ))
}

/// Replace a post's fields
#[utoipa::path(
    put,
    path = "/v1/blog/{id}",
    params(("id" = String, Path, description = "Blog document id")),
    request_body = BlogInput,
    responses(
        (status = 200, description = "Post updated", body = MessageResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_blog(
    State(state): State<AppState>,
    RequireBlogUpdate(auth_user): RequireBlogUpdate,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<BlogInput>,
) -> Result<Json<MessageResponse>, AppError> {
    BlogService::update(state.store.as_ref(), &id, input, &auth_user.email).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Blog updated successfully".to_string(),
    }))
}

/// Delete a post
#[utoipa::path(
    delete,
    path = "/v1/blog/{id}",
    params(("id" = String, Path, description = "Blog document id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Blog"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_blog(
    State(state): State<AppState>,
    RequireBlogDelete(_auth_user): RequireBlogDelete,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    BlogService::delete(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Blog deleted successfully".to_string(),
    }))
}
