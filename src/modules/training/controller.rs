use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use tracing::instrument;

use crate::middleware::auth::{
    RequireTrainingCreate, RequireTrainingDelete, RequireTrainingRead, RequireTrainingUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::services::model::CreatedResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AdminListTrainingsParams, ListTrainingsParams, PageQuery, TrainingInput, TrainingResponse,
    TrainingsListResponse, UpdateStatusRequest,
};
use super::service::TrainingService;

/// List active trainings
#[utoipa::path(
    get,
    path = "/v1/training",
    params(
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("level" = Option<String>, Query, description = "Filter by level"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of active trainings", body = TrainingsListResponse),
        (status = 400, description = "Conflicting pagination parameters or bad token", body = ErrorResponse)
    ),
    tag = "Training"
)]
#[instrument(skip(state))]
pub async fn list_trainings(
    State(state): State<AppState>,
    Query(params): Query<ListTrainingsParams>,
) -> Result<Json<TrainingsListResponse>, AppError> {
    let (trainings, pagination) = TrainingService::list_public(state.store.as_ref(), params).await?;
    Ok(Json(TrainingsListResponse {
        success: true,
        trainings,
        pagination,
    }))
}

/// List trainings for administration, including deactivated ones
#[utoipa::path(
    get,
    path = "/v1/training/admin",
    params(
        ("isActive" = Option<String>, Query, description = "\"true\" or \"false\"; absent means both"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("level" = Option<String>, Query, description = "Filter by level"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of trainings", body = TrainingsListResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_trainings_admin(
    State(state): State<AppState>,
    RequireTrainingRead(_auth_user): RequireTrainingRead,
    Query(params): Query<AdminListTrainingsParams>,
) -> Result<Json<TrainingsListResponse>, AppError> {
    let (trainings, pagination) = TrainingService::list_admin(state.store.as_ref(), params).await?;
    Ok(Json(TrainingsListResponse {
        success: true,
        trainings,
        pagination,
    }))
}

/// Fetch one active training
#[utoipa::path(
    get,
    path = "/v1/training/{id}",
    params(("id" = String, Path, description = "Training document id")),
    responses(
        (status = 200, description = "The training", body = TrainingResponse),
        (status = 404, description = "Training missing or deactivated", body = ErrorResponse)
    ),
    tag = "Training"
)]
#[instrument(skip(state))]
pub async fn get_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrainingResponse>, AppError> {
    let training = TrainingService::get_public(state.store.as_ref(), &id).await?;
    Ok(Json(TrainingResponse {
        success: true,
        training,
    }))
}

/// Fetch one training for administration, regardless of status
#[utoipa::path(
    get,
    path = "/v1/training/admin/{id}",
    params(("id" = String, Path, description = "Training document id")),
    responses(
        (status = 200, description = "The training", body = TrainingResponse),
        (status = 404, description = "Training not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_training_admin(
    State(state): State<AppState>,
    RequireTrainingRead(_auth_user): RequireTrainingRead,
    Path(id): Path<String>,
) -> Result<Json<TrainingResponse>, AppError> {
    let training = TrainingService::get_admin(state.store.as_ref(), &id).await?;
    Ok(Json(TrainingResponse {
        success: true,
        training,
    }))
}

/// List active trainings in a category
#[utoipa::path(
    get,
    path = "/v1/training/category/{category}",
    params(
        ("category" = String, Path, description = "Category"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of active trainings", body = TrainingsListResponse)
    ),
    tag = "Training"
)]
#[instrument(skip(state))]
pub async fn list_trainings_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TrainingsListResponse>, AppError> {
    let params = ListTrainingsParams {
        category: Some(category),
        level: None,
        search: query.search,
        limit: query.limit,
        page: query.page,
        page_token: query.page_token,
    };
    let (trainings, pagination) = TrainingService::list_public(state.store.as_ref(), params).await?;
    Ok(Json(TrainingsListResponse {
        success: true,
        trainings,
        pagination,
    }))
}

/// List active trainings at a level
#[utoipa::path(
    get,
    path = "/v1/training/level/{level}",
    params(
        ("level" = String, Path, description = "Difficulty level"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of active trainings", body = TrainingsListResponse)
    ),
    tag = "Training"
)]
#[instrument(skip(state))]
pub async fn list_trainings_by_level(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<TrainingsListResponse>, AppError> {
    let params = ListTrainingsParams {
        category: None,
        level: Some(level),
        search: query.search,
        limit: query.limit,
        page: query.page,
        page_token: query.page_token,
    };
    let (trainings, pagination) = TrainingService::list_public(state.store.as_ref(), params).await?;
    Ok(Json(TrainingsListResponse {
        success: true,
        trainings,
        pagination,
    }))
}

/// Create a training
#[utoipa::path(
    post,
    path = "/v1/training",
    request_body = TrainingInput,
    responses(
        (status = 201, description = "Training created", body = CreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, auth_user))]
pub async fn create_training(
    State(state): State<AppState>,
    RequireTrainingCreate(auth_user): RequireTrainingCreate,
    ValidatedJson(input): ValidatedJson<TrainingInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = TrainingService::create(state.store.as_ref(), input, &auth_user.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id,
            message: "Training created successfully".to_string(),
        }),
    ))
}

/// Replace a training's fields
#[utoipa::path(
    put,
    path = "/v1/training/{id}",
    params(("id" = String, Path, description = "Training document id")),
    request_body = TrainingInput,
    responses(
        (status = 200, description = "Training updated", body = MessageResponse),
        (status = 404, description = "Training not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_training(
    State(state): State<AppState>,
    RequireTrainingUpdate(auth_user): RequireTrainingUpdate,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<TrainingInput>,
) -> Result<Json<MessageResponse>, AppError> {
    TrainingService::update(state.store.as_ref(), &id, input, &auth_user.email).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Training updated successfully".to_string(),
    }))
}

/// Activate or deactivate a training
#[utoipa::path(
    patch,
    path = "/v1/training/{id}/status",
    params(("id" = String, Path, description = "Training document id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 404, description = "Training not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_training_status(
    State(state): State<AppState>,
    RequireTrainingUpdate(auth_user): RequireTrainingUpdate,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    TrainingService::set_status(state.store.as_ref(), &id, body.is_active, &auth_user.email)
        .await?;
    let message = if body.is_active {
        "Training activated successfully"
    } else {
        "Training deactivated successfully"
    };
    Ok(Json(MessageResponse {
        success: true,
        message: message.to_string(),
    }))
}

/// Soft-delete a training
#[utoipa::path(
    delete,
    path = "/v1/training/{id}",
    params(("id" = String, Path, description = "Training document id")),
    responses(
        (status = 200, description = "Training deactivated", body = MessageResponse),
        (status = 404, description = "Training not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_training(
    State(state): State<AppState>,
    RequireTrainingDelete(auth_user): RequireTrainingDelete,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    TrainingService::soft_delete(state.store.as_ref(), &id, &auth_user.email).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Training deleted successfully".to_string(),
    }))
}

/// Permanently remove a training
#[utoipa::path(
    delete,
    path = "/v1/training/{id}/permanent",
    params(("id" = String, Path, description = "Training document id")),
    responses(
        (status = 200, description = "Training removed", body = MessageResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Training"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_training_permanent(
    State(state): State<AppState>,
    RequireTrainingDelete(_auth_user): RequireTrainingDelete,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    TrainingService::permanent_delete(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Training permanently deleted".to_string(),
    }))
}
