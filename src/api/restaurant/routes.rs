use crate::api::models::AppState;
use crate::api::restaurant::handlers::*;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants",
            get(list_restaurants_handler).post(create_restaurant_handler),
        )
        .route(
            "/restaurants/{id}",
            get(get_restaurant_handler).delete(delete_restaurant_handler),
        )
}
