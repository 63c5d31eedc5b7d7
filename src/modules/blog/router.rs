use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{create_blog, delete_blog, get_blog, list_blogs, update_blog};

pub fn init_blog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs))
        .route("/", post(create_blog))
        .route("/{id}", get(get_blog))
        .route("/{id}", put(update_blog))
        .route("/{id}", delete(delete_blog))
}
