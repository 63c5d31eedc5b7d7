use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    delete_contact, get_contact, list_contacts, submit_contact, update_contact_status,
};

pub fn init_contact_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_contact))
        .route("/", get(list_contacts))
        .route("/{id}", get(get_contact))
        .route("/{id}", delete(delete_contact))
        .route("/{id}/status", patch(update_contact_status))
}
