use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use accounts_core::health::{healthz, readyz};
use accounts_core::middleware::request_id_layer;

use crate::handlers::{
    photo::{replace_my_photo, upload_photo},
    user::{
        create_user, delete_user, get_me, get_user, list_users, update_credentials,
        update_my_email,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/me", get(get_me))
        .route("/users/me/email", patch(update_my_email))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/credentials", patch(update_credentials))
        .route("/users/{id}", delete(delete_user))
        // Photos
        .route("/users/photo", post(upload_photo))
        .route("/users/me/photo", put(replace_my_photo))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
