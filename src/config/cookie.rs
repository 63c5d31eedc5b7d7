use std::env;

/// Attributes of the httpOnly session cookie.
///
/// Production (`APP_ENV=production`) runs cross-site behind HTTPS, so the
/// cookie gets `Secure`, `SameSite=None` and the configured domain;
/// everything else stays on `SameSite=Lax` without a domain.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    /// Cookie lifetime in days.
    pub expires_days: i64,
    pub secure: bool,
    pub same_site: String,
    pub domain: Option<String>,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        let is_production = env::var("APP_ENV").is_ok_and(|v| v == "production");

        Self {
            expires_days: env::var("JWT_COOKIE_EXPIRES_IN")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            secure: is_production,
            same_site: if is_production { "None" } else { "Lax" }.to_string(),
            domain: if is_production {
                env::var("COOKIE_DOMAIN").ok()
            } else {
                None
            },
        }
    }
}
