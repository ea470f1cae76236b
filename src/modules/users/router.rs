use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    change_password, delete_user, get_me, get_user, get_user_documents, list_users, search_users,
    update_user,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(get_me))
        .route("/password/{id}", put(change_password))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/documents", get(get_user_documents))
}

pub fn init_user_search_router() -> Router<AppState> {
    Router::new().route("/users", get(search_users))
}
