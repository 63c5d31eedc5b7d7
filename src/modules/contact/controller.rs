use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use tracing::instrument;

use crate::middleware::auth::{
    OptionalAuthUser, RequireContactDelete, RequireContactRead, RequireContactUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::MessageResponse;
use crate::modules::services::model::CreatedResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    ContactInput, ContactResponse, ContactStatus, ContactsListResponse, ListContactsParams,
    UpdateContactStatusRequest,
};
use super::service::ContactService;

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/v1/contact",
    request_body = ContactInput,
    responses(
        (status = 201, description = "Submission recorded", body = CreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Contact"
)]
#[instrument(skip(state, auth_user))]
pub async fn submit_contact(
    State(state): State<AppState>,
    OptionalAuthUser(auth_user): OptionalAuthUser,
    ValidatedJson(input): ValidatedJson<ContactInput>,
) -> Result<impl IntoResponse, AppError> {
    let submitted_by = auth_user.map(|user| user.email);
    let id = ContactService::create(state.store.as_ref(), input, submitted_by).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            success: true,
            id,
            message: "Contact form submitted successfully".to_string(),
        }),
    ))
}

/// List submissions
#[utoipa::path(
    get,
    path = "/v1/contact",
    params(
        ("status" = Option<String>, Query, description = "pending, in_progress, resolved or closed"),
        ("search" = Option<String>, Query, description = "Substring search (offset strategy)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100"),
        ("page" = Option<i64>, Query, description = "1-based page (offset strategy)"),
        ("pageToken" = Option<String>, Query, description = "Opaque cursor (cursor strategy)")
    ),
    responses(
        (status = 200, description = "Page of submissions", body = ContactsListResponse),
        (status = 400, description = "Invalid status or pagination parameters", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_contacts(
    State(state): State<AppState>,
    RequireContactRead(_auth_user): RequireContactRead,
    Query(params): Query<ListContactsParams>,
) -> Result<Json<ContactsListResponse>, AppError> {
    let (contacts, pagination) = ContactService::list(state.store.as_ref(), params).await?;
    Ok(Json(ContactsListResponse {
        success: true,
        contacts,
        pagination,
    }))
}

/// Fetch one submission
#[utoipa::path(
    get,
    path = "/v1/contact/{id}",
    params(("id" = String, Path, description = "Contact document id")),
    responses(
        (status = 200, description = "The submission", body = ContactResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_contact(
    State(state): State<AppState>,
    RequireContactRead(_auth_user): RequireContactRead,
    Path(id): Path<String>,
) -> Result<Json<ContactResponse>, AppError> {
    let contact = ContactService::get(state.store.as_ref(), &id).await?;
    Ok(Json(ContactResponse {
        success: true,
        contact,
    }))
}

/// Move a submission through triage
#[utoipa::path(
    patch,
    path = "/v1/contact/{id}/status",
    params(("id" = String, Path, description = "Contact document id")),
    request_body = UpdateContactStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 404, description = "Contact not found", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_contact_status(
    State(state): State<AppState>,
    RequireContactUpdate(auth_user): RequireContactUpdate,
    Path(id): Path<String>,
    Json(body): Json<UpdateContactStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let status =
        ContactStatus::parse(&body.status).ok_or_else(|| AppError::validation("Invalid status"))?;
    ContactService::set_status(state.store.as_ref(), &id, status, &auth_user.email).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Contact status updated successfully".to_string(),
    }))
}

/// Delete a submission
#[utoipa::path(
    delete,
    path = "/v1/contact/{id}",
    params(("id" = String, Path, description = "Contact document id")),
    responses(
        (status = 200, description = "Submission deleted", body = MessageResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Contact"
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_contact(
    State(state): State<AppState>,
    RequireContactDelete(_auth_user): RequireContactDelete,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ContactService::delete(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Contact deleted successfully".to_string(),
    }))
}
