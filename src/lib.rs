//! REST backend for the public site: services catalog, blog, training
//! library, contact form and user accounts, served over an opaque
//! document store with JWT sessions and role-based access control.

pub mod config;
pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod store;
pub mod utils;
pub mod validator;
