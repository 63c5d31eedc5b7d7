use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_user, login, logout, me, register, session, update_profile, update_role,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(register))
        .route("/login", post(login))
        .route("/session", post(session))
        .route("/me", get(me))
        .route("/profile", patch(update_profile))
        .route("/create-user", post(create_user))
        .route("/update-role/{email}", patch(update_role))
        .route("/logout", post(logout))
}
