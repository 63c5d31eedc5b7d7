//! Request middleware: authentication extractors and the role-based
//! access control table behind them.

pub mod auth;
pub mod rbac;
