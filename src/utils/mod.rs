//! Shared utilities.
//!
//! - [`cookies`]: session cookie construction
//! - [`errors`]: application error taxonomy
//! - [`jwt`]: session token signing and verification
//! - [`pagination`]: paginated query building over the document store
//! - [`password`]: password hashing and verification

pub mod cookies;
pub mod errors;
pub mod jwt;
pub mod pagination;
pub mod password;
