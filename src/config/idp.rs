use std::env;

/// Trust root of the external identity provider.
///
/// ID tokens on the provider verification path are checked against this
/// issuer, audience and RSA public key instead of the local signing
/// secret. The key is configured statically; JWKS refresh is out of scope.
#[derive(Clone, Debug)]
pub struct IdProviderConfig {
    pub issuer: String,
    pub audience: String,
    pub public_key_pem: String,
}

impl IdProviderConfig {
    /// Returns `None` when the provider path is not configured; routes
    /// relying on it then reject with 401.
    pub fn from_env() -> Option<Self> {
        let issuer = env::var("IDP_ISSUER").ok()?;
        let audience = env::var("IDP_AUDIENCE").ok()?;
        let public_key_pem = env::var("IDP_PUBLIC_KEY").ok()?;

        Some(Self {
            issuer,
            audience,
            public_key_pem,
        })
    }
}
