use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use tracing::instrument;

use crate::middleware::auth::{RequireServicesCreate, RequireServicesDelete, RequireServicesUpdate};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    CreatedResponse, ListServicesParams, ServiceInput, ServiceResponse, ServicesListResponse,
};
use super::service::ServiceService;

/// List services
#[utoipa::path(
    get,
    path = "/v1/services",
    params(
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("tags" = Option<String>, Query, description = "Comma-separated tags, any-match"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of services", body = ServicesListResponse),
        (status = 400, description = "Conflicting pagination parameters or bad token", body = ErrorResponse)
    ),
    tag = "Services"
)]
#[instrument(skip(state))]
pub async fn list_services(
    State(state): State<AppState>,
    Query(params): Query<ListServicesParams>,
) -> Result<Json<ServicesListResponse>, AppError> {
    let (services, pagination) = ServiceService::list(state.store.as_ref(), params).await?;
    Ok(Json(ServicesListResponse {
        success: true,
        services,
        pagination,
    }))
}

/// Fetch one service
#[utoipa::path(
    get,
    path = "/v1/services/{id}",
    params(("id" = String, Path, description = "Service document id")),
    responses(
        (status = 200, description = "The service", body = ServiceResponse),
        (status = 404, description = "Service not found", body = ErrorResponse)
    ),
    tag = "Services"
)]
#[instrument(skip(state))]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse>, AppError> {
    let service = ServiceService::get(state.store.as_ref(), &id).await?;
    Ok(Json(ServiceResponse {
        success: true,
        service,
    }))
}

/// Create a service
#[utoipa::path(
    post,
    path = "/v1/services",
    request_body = ServiceInput,
    responses(
        (status = 201, description = "Service created", body = CreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, auth_user))]
pub async fn create_service(
    State(state): State<AppState>,
    RequireServicesCreate(auth_user): RequireServicesCreate,
    ValidatedJson(input): ValidatedJson<ServiceInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = ServiceService::create(state.store.as_ref(), input, &auth_user.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id,
            message: "Service created successfully".to_string(),
        }),
    ))
}

/// Replace a service's fields
#[utoipa::path(
    put,
    path = "/v1/services/{id}",
    params(("id" = String, Path, description = "Service document id")),
    request_body = ServiceInput,
    responses(
        (status = 200, description = "Service updated", body = MessageResponse),
        (status = 404, description = "Service not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_service(
    State(state): State<AppState>,
    RequireServicesUpdate(auth_user): RequireServicesUpdate,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<ServiceInput>,
) -> Result<Json<MessageResponse>, AppError> {
    ServiceService::update(state.store.as_ref(), &id, input, &auth_user.email).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Service updated successfully".to_string(),
    }))
}

/// Delete a service
#[utoipa::path(
    delete,
    path = "/v1/services/{id}",
    params(("id" = String, Path, description = "Service document id")),
    responses(
        (status = 200, description = "Service deleted", body = MessageResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_service(
    State(state): State<AppState>,
    RequireServicesDelete(_auth_user): RequireServicesDelete,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ServiceService::delete(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Service deleted successfully".to_string(),
    }))
}
