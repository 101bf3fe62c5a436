use crate::api::catalog::handlers::*;
use crate::api::models::AppState;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(tags_handler))
        .route("/city", get(cities_handler))
        .route("/img-url", get(img_urls_handler))
        .route("/restaurants/{id}/tags", get(restaurant_tags_handler))
        .route("/restaurants/{id}/city", get(restaurant_city_handler))
        .route("/restaurants/{id}/img-url", get(restaurant_img_url_handler))
}
