//! Authentication extractors.
//!
//! [`AuthUser`] validates the session token, loads the user record and
//! enforces the active flag; every protected handler takes it (or one of
//! the `require_permission!` wrappers) as an argument. The stored role
//! always wins over whatever the token claims.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::modules::auth::model::{self, User, UserRole};
use crate::state::AppState;
use crate::store::Document;
use crate::utils::errors::AppError;
use crate::utils::jwt::{verify_provider_token, verify_token};

/// Session token from the `Authorization: Bearer` header, falling back
/// to the httpOnly `token` cookie.
fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    if bearer.is_some() {
        return bearer;
    }

    CookieJar::from_headers(&parts.headers)
        .get("token")
        .map(|cookie| cookie.value().to_string())
}

/// Load the user record for an identity key and enforce the active flag.
async fn load_active_user(state: &AppState, key: &str) -> Result<User, AppError> {
    let doc: Option<Document> = state.store.get(model::COLLECTION, key).await?;
    let user: User = doc
        .ok_or_else(|| AppError::not_found("User not found"))?
        .deserialize()
        .map_err(AppError::from)?;

    if !user.is_active {
        return Err(AppError::unauthenticated("User account is disabled"));
    }

    Ok(user)
}

/// Extractor for locally issued session tokens.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: UserRole,
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            extract_token(parts).ok_or_else(|| AppError::unauthenticated("No token provided"))?;

        let claims = verify_token(&token, &state.jwt_config)?;

        let key = if !claims.sub.is_empty() {
            claims.sub.clone()
        } else if !claims.email.is_empty() {
            claims.email.clone()
        } else {
            return Err(AppError::unauthenticated("Invalid token payload"));
        };

        let user = load_active_user(state, &key).await?;

        Ok(AuthUser {
            email: user.email.clone(),
            role: user.role,
            user,
        })
    }
}

/// Extractor for ID tokens issued by the external identity provider.
///
/// Same pipeline as [`AuthUser`] with the verification step swapped for
/// the provider trust root. Rejects with 401 when no provider is
/// configured.
#[derive(Debug, Clone)]
pub struct ProviderAuthUser {
    pub email: String,
    pub role: UserRole,
    pub user: User,
}

impl FromRequestParts<AppState> for ProviderAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token =
            extract_token(parts).ok_or_else(|| AppError::unauthenticated("No token provided"))?;

        let idp = state
            .idp_config
            .as_ref()
            .ok_or_else(|| AppError::unauthenticated("Identity provider is not configured"))?;

        let claims = verify_provider_token(&token, idp)?;
        let key = claims
            .identity_key()
            .ok_or_else(|| AppError::unauthenticated("Invalid token payload"))?
            .to_string();

        let user = load_active_user(state, &key).await?;

        Ok(ProviderAuthUser {
            email: user.email.clone(),
            role: user.role,
            user,
        })
    }
}

/// Best-effort authentication: `None` when the request carries no valid
/// session, never a rejection. Used to attribute submissions from
/// logged-in visitors without requiring login.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Defines an extractor that authenticates and then checks one
/// permission against the role table, rejecting with 403.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::utils::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user =
                    <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                        $crate::state::AppState,
                    >>::from_request_parts(parts, state)
                    .await?;

                if !$crate::middleware::rbac::is_allowed(auth_user.role, $permission) {
                    return Err($crate::utils::errors::AppError::forbidden(
                        "Insufficient permissions",
                    ));
                }

                Ok($name(auth_user))
            }
        }
    };
}

use crate::middleware::rbac::Permission;

require_permission!(RequireServicesCreate, Permission::ServicesCreate);
require_permission!(RequireServicesUpdate, Permission::ServicesUpdate);
require_permission!(RequireServicesDelete, Permission::ServicesDelete);

require_permission!(RequireBlogCreate, Permission::BlogCreate);
require_permission!(RequireBlogUpdate, Permission::BlogUpdate);
require_permission!(RequireBlogDelete, Permission::BlogDelete);

require_permission!(RequireTrainingCreate, Permission::TrainingCreate);
require_permission!(RequireTrainingRead, Permission::TrainingRead);
require_permission!(RequireTrainingUpdate, Permission::TrainingUpdate);
require_permission!(RequireTrainingDelete, Permission::TrainingDelete);

require_permission!(RequireContactRead, Permission::ContactRead);
require_permission!(RequireContactUpdate, Permission::ContactUpdate);
require_permission!(RequireContactDelete, Permission::ContactDelete);

require_permission!(RequireUsersCreate, Permission::UsersCreate);
require_permission!(RequireUsersUpdate, Permission::UsersUpdate);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_extract_token_prefers_bearer_header() {
        let parts = parts_with(&[
            ("authorization", "Bearer header-token"),
            ("cookie", "token=cookie-token"),
        ]);
        assert_eq!(extract_token(&parts), Some("header-token".to_string()));
    }

    #[test]
    fn test_extract_token_falls_back_to_cookie() {
        let parts = parts_with(&[("cookie", "theme=dark; token=cookie-token")]);
        assert_eq!(extract_token(&parts), Some("cookie-token".to_string()));
    }

    #[test]
    fn test_extract_token_ignores_non_bearer_scheme() {
        let parts = parts_with(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn test_extract_token_absent() {
        let parts = parts_with(&[]);
        assert_eq!(extract_token(&parts), None);
    }
}
