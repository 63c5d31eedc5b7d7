use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_training, delete_training, delete_training_permanent, get_training, get_training_admin,
    list_trainings, list_trainings_admin, list_trainings_by_category, list_trainings_by_level,
    update_training, update_training_status,
};

pub fn init_training_router() -> Router<AppState> {
    // Static segments before the `{id}` catch-all.
    Router::new()
        .route("/", get(list_trainings))
        .route("/", post(create_training))
        .route("/admin", get(list_trainings_admin))
        .route("/admin/{id}", get(get_training_admin))
        .route("/category/{category}", get(list_trainings_by_category))
        .route("/level/{level}", get(list_trainings_by_level))
        .route("/{id}", get(get_training))
        .route("/{id}", put(update_training))
        .route("/{id}", delete(delete_training))
        .route("/{id}/status", patch(update_training_status))
        .route("/{id}/permanent", delete(delete_training_permanent))
}
