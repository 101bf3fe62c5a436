use crate::api::comment::handlers::*;
use crate::api::models::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(add_comment_handler))
        .route("/restaurants/{id}/comments", get(restaurant_comments_handler))
}
