//! Application configuration, loaded from the environment once at startup.

pub mod cookie;
pub mod cors;
pub mod idp;
pub mod jwt;
