use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use crate::config::idp::IdProviderConfig;
use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, ProviderClaims, UserRole};
use crate::utils::errors::AppError;

/// Sign a session token for the given identity.
///
/// The email is the canonical identity key and doubles as the `sub` claim.
pub fn create_token(email: &str, role: UserRole, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.expires_in as usize;

    let claims = Claims {
        sub: email.to_string(),
        email: email.to_string(),
        role: Some(role),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verify a session token and return its claims.
///
/// Expired tokens and malformed/tampered tokens fail with distinct
/// messages so callers and clients can tell the two apart. Expiry is
/// checked with zero leeway.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthenticated("Token expired"),
        _ => AppError::unauthenticated("Invalid token"),
    })
}

/// Verify an ID token issued by the external identity provider.
///
/// RS256 against the configured trust root; issuer and audience must
/// match.
pub fn verify_provider_token(
    token: &str,
    idp: &IdProviderConfig,
) -> Result<ProviderClaims, AppError> {
    let key = DecodingKey::from_rsa_pem(idp.public_key_pem.as_bytes()).map_err(|e| {
        AppError::internal(anyhow::anyhow!("Invalid identity provider key: {}", e))
    })?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.leeway = 0;
    validation.set_issuer(&[&idp.issuer]);
    validation.set_audience(&[&idp.audience]);

    decode::<ProviderClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthenticated("Token expired"),
            _ => AppError::unauthenticated("Invalid identity provider token"),
        })
}
