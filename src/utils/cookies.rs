//! Session cookie construction.
//!
//! Builds `Set-Cookie` header values for the httpOnly `token` cookie via
//! axum-extra's `Cookie` builder; reading the cookie back happens through
//! `CookieJar` in the auth extractors.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::config::cookie::CookieConfig;

fn parse_same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "none" => SameSite::None,
        "strict" => SameSite::Strict,
        _ => SameSite::Lax,
    }
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, config: &CookieConfig) -> String {
    let mut cookie = Cookie::build(("token", token))
        .path("/")
        .expires(OffsetDateTime::now_utc() + Duration::days(config.expires_days))
        .http_only(true)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
        .build();
    if let Some(domain) = &config.domain {
        cookie.set_domain(domain.clone());
    }
    cookie.to_string()
}

/// `Set-Cookie` value that replaces the session with a short-lived
/// tombstone, logging the client out.
pub fn clear_session_cookie() -> String {
    Cookie::build(("token", "logged-out"))
        .path("/")
        .expires(OffsetDateTime::now_utc() + Duration::seconds(10))
        .http_only(true)
        .build()
        .to_string()
}
