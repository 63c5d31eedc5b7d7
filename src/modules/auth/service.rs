use chrono::Utc;
use serde_json::json;

use crate::config::jwt::JwtConfig;
use crate::store::{DocumentStore, to_fields};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{
    COLLECTION, CreateUserRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, User,
    UserRole,
};

pub struct AuthService;

impl AuthService {
    /// Self-registration. New accounts always start as `user`.
    pub async fn register(
        store: &dyn DocumentStore,
        jwt_config: &JwtConfig,
        dto: RegisterRequest,
    ) -> Result<(String, User), AppError> {
        if store.get(COLLECTION, &dto.email).await?.is_some() {
            return Err(AppError::validation("User already exists"));
        }

        let now = Utc::now();
        let user = User {
            name: dto.name,
            phone: dto.phone,
            email: dto.email,
            password: hash_password(&dto.password)?,
            role: UserRole::User,
            is_active: true,
            created_at: now,
            updated_at: now,
            created_by: None,
            updated_by: None,
        };

        store
            .set(COLLECTION, &user.email, to_fields(&user)?)
            .await?;

        let token = create_token(&user.email, user.role, jwt_config)?;
        Ok((token, user))
    }

    /// Credential login. Unknown emails and wrong passwords fail with
    /// the same message.
    pub async fn login(
        store: &dyn DocumentStore,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<(String, User), AppError> {
        let user: User = store
            .get(COLLECTION, &dto.email)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Invalid credentials"))?
            .deserialize()
            .map_err(AppError::from)?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::unauthenticated("Invalid credentials"));
        }
        if !user.is_active {
            return Err(AppError::unauthenticated("Account is disabled"));
        }

        let now = Utc::now();
        store
            .update(
                COLLECTION,
                &user.email,
                to_fields(&json!({ "updatedAt": now }))?,
            )
            .await?;

        let token = create_token(&user.email, user.role, jwt_config)?;
        Ok((token, User { updated_at: now, ..user }))
    }

    pub async fn update_profile(
        store: &dyn DocumentStore,
        email: &str,
        dto: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        let mut patch = serde_json::Map::new();
        if let Some(name) = dto.name {
            patch.insert("name".to_string(), json!(name));
        }
        if let Some(phone) = dto.phone {
            patch.insert("phone".to_string(), json!(phone));
        }
        patch.insert("updatedAt".to_string(), json!(Utc::now()));
        patch.insert("updatedBy".to_string(), json!(email));

        store.update(COLLECTION, email, patch).await?;

        store
            .get(COLLECTION, email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?
            .deserialize()
            .map_err(AppError::from)
    }

    /// Admin-side creation with an explicit role and audit trail.
    pub async fn create_user(
        store: &dyn DocumentStore,
        dto: CreateUserRequest,
        created_by: &str,
    ) -> Result<User, AppError> {
        if store.get(COLLECTION, &dto.email).await?.is_some() {
            return Err(AppError::validation("User already exists"));
        }

        let now = Utc::now();
        let user = User {
            name: dto.name,
            phone: dto.phone,
            email: dto.email,
            password: hash_password(&dto.password)?,
            role: dto.role.unwrap_or_default(),
            is_active: true,
            created_at: now,
            updated_at: now,
            created_by: Some(created_by.to_string()),
            updated_by: None,
        };

        store
            .set(COLLECTION, &user.email, to_fields(&user)?)
            .await?;

        Ok(user)
    }

    /// Change a user's role. The role arrives pre-parsed; unknown role
    /// strings are rejected at the controller.
    pub async fn update_role(
        store: &dyn DocumentStore,
        email: &str,
        role: UserRole,
        updated_by: &str,
    ) -> Result<User, AppError> {
        if store.get(COLLECTION, email).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        store
            .update(
                COLLECTION,
                email,
                to_fields(&json!({
                    "role": role,
                    "updatedAt": Utc::now(),
                    "updatedBy": updated_by,
                }))?,
            )
            .await?;

        store
            .get(COLLECTION, email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?
            .deserialize()
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expires_in: 3600,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let store = MemoryStore::new();
        let config = jwt_config();

        let dto = RegisterRequest {
            name: "Ada".to_string(),
            phone: "08012345678".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };
        let (token, user) = AuthService::register(&store, &config, dto).await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(user.role, UserRole::User);

        let (_, logged_in) = AuthService::login(
            &store,
            &config,
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(logged_in.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_rejected() {
        let store = MemoryStore::new();
        let config = jwt_config();
        let dto = || RegisterRequest {
            name: "Ada".to_string(),
            phone: "08012345678".to_string(),
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
        };

        AuthService::register(&store, &config, dto()).await.unwrap();
        let err = AuthService::register(&store, &config, dto())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_alike() {
        let store = MemoryStore::new();
        let config = jwt_config();
        AuthService::register(
            &store,
            &config,
            RegisterRequest {
                name: "Ada".to_string(),
                phone: "08012345678".to_string(),
                email: "ada@example.com".to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap();

        let wrong_password = AuthService::login(
            &store,
            &config,
            LoginRequest {
                email: "ada@example.com".to_string(),
                password: "nope-nope-nope".to_string(),
            },
        )
        .await
        .unwrap_err();
        let unknown_email = AuthService::login(
            &store,
            &config,
            LoginRequest {
                email: "ghost@example.com".to_string(),
                password: "password123".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_create_user_assigns_role_and_audit() {
        let store = MemoryStore::new();
        let user = AuthService::create_user(
            &store,
            CreateUserRequest {
                name: "Ed".to_string(),
                phone: "08012345678".to_string(),
                email: "ed@example.com".to_string(),
                password: "password123".to_string(),
                role: Some(UserRole::Editor),
            },
            "root@example.com",
        )
        .await
        .unwrap();

        assert_eq!(user.role, UserRole::Editor);
        assert_eq!(user.created_by.as_deref(), Some("root@example.com"));
    }

    #[tokio::test]
    async fn test_update_role_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let err = AuthService::update_role(
            &store,
            "ghost@example.com",
            UserRole::Admin,
            "root@example.com",
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }
}
