use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use utoipa::ToSchema;

use tracing::instrument;

use crate::middleware::auth::{AuthUser, ProviderAuthUser, RequireUsersCreate, RequireUsersUpdate};
use crate::state::AppState;
use crate::utils::cookies::{clear_session_cookie, session_cookie};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::validator::ValidatedJson;

use super::model::{
    AuthResponse, CreateUserRequest, LoginRequest, MeResponse, MessageResponse, RegisterRequest,
    SessionUser, UpdateProfileRequest, UpdateRoleRequest, UserRole,
};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/v1/auth/create",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, session cookie set", body = AuthResponse),
        (status = 400, description = "Validation error or user already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = AuthService::register(state.store.as_ref(), &state.jwt_config, dto).await?;

    let cookie = session_cookie(&token, &state.cookie_config);
    let body = AuthResponse {
        success: true,
        user: SessionUser {
            email: user.email,
            role: user.role,
        },
        token,
    };
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(body),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = AuthResponse),
        (status = 401, description = "Invalid credentials or disabled account", body = ErrorResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (token, user) = AuthService::login(state.store.as_ref(), &state.jwt_config, dto).await?;

    let cookie = session_cookie(&token, &state.cookie_config);
    let body = AuthResponse {
        success: true,
        user: SessionUser {
            email: user.email,
            role: user.role,
        },
        token,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

/// Exchange an identity-provider ID token for a local session
#[utoipa::path(
    post,
    path = "/v1/auth/session",
    responses(
        (status = 200, description = "Session issued, cookie set", body = AuthResponse),
        (status = 401, description = "Invalid provider token or no provider configured", body = ErrorResponse),
        (status = 404, description = "No account for this identity", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn session(
    State(state): State<AppState>,
    ProviderAuthUser { email, role, .. }: ProviderAuthUser,
) -> Result<impl IntoResponse, AppError> {
    let token = create_token(&email, role, &state.jwt_config)?;

    let cookie = session_cookie(&token, &state.cookie_config);
    let body = AuthResponse {
        success: true,
        user: SessionUser { email, role },
        token,
    };
    Ok(([(header::SET_COOKIE, cookie)], Json(body)))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Authenticated user's record", body = MeResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User record no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(auth_user))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        success: true,
        user: auth_user.user.into(),
    })
}

/// Update the current user's name or phone
#[utoipa::path(
    patch,
    path = "/v1/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = MeResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let user = AuthService::update_profile(state.store.as_ref(), &auth_user.email, dto).await?;
    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}

/// Create a user with an explicit role
#[utoipa::path(
    post,
    path = "/v1/auth/create-user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = MeResponse),
        (status = 400, description = "Validation error or user already exists", body = ErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    RequireUsersCreate(auth_user): RequireUsersCreate,
    ValidatedJson(dto): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthService::create_user(state.store.as_ref(), dto, &auth_user.email).await?;
    Ok((
        StatusCode::CREATED,
        Json(MeResponse {
            success: true,
            user: user.into(),
        }),
    ))
}

/// Change a user's role
#[utoipa::path(
    patch,
    path = "/v1/auth/update-role/{email}",
    params(("email" = String, Path, description = "Email of the user to update")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = MeResponse),
        (status = 400, description = "Invalid role", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state, auth_user))]
pub async fn update_role(
    State(state): State<AppState>,
    RequireUsersUpdate(auth_user): RequireUsersUpdate,
    Path(email): Path<String>,
    Json(dto): Json<UpdateRoleRequest>,
) -> Result<Json<MeResponse>, AppError> {
    let role = UserRole::parse(&dto.role).ok_or_else(|| AppError::validation("Invalid role"))?;
    let user =
        AuthService::update_role(state.store.as_ref(), &email, role, &auth_user.email).await?;
    Ok(Json(MeResponse {
        success: true,
        user: user.into(),
    }))
}

/// Logout, clearing the session cookie
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument]
pub async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(MessageResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}
