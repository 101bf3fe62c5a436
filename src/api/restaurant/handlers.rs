use crate::api::models::*;
use crate::storage::{NewRestaurant, Restaurant};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

/// Fetch a restaurant or answer 404
pub(crate) async fn load_restaurant(state: &AppState, id: &str) -> Result<Restaurant, AppError> {
    state
        .store
        .find_restaurant(id)
        .await?
        .ok_or_else(AppError::restaurant_not_found)
}

pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewRestaurant>, JsonRejection>,
) -> Result<(StatusCode, Json<Restaurant>), AppError> {
    let Json(request) = payload?;
    let initial_comments = request.comments.len();

    let restaurant = state.store.create_restaurant(request).await?;

    info!(
        restaurant_id = %restaurant.key,
        initial_comments,
        "Restaurant created"
    );

    Ok((StatusCode::CREATED, Json(restaurant)))
}

pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, AppError> {
    let restaurants = state.store.find_restaurants().await?;
    Ok(Json(restaurants))
}

pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantDetail>, AppError> {
    let restaurant = load_restaurant(&state, &id).await?;

    // The flag decides whether the comment collection is consulted at all
    let comments = if restaurant.has_comments {
        Some(state.store.find_comments_by_restaurant(&restaurant.key).await?)
    } else {
        None
    };

    Ok(Json(RestaurantDetail { restaurant, comments }))
}

pub async fn delete_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let removed = state
        .store
        .delete_restaurant(&id)
        .await?
        .ok_or_else(AppError::restaurant_not_found)?;

    info!(restaurant_id = %removed.key, "Restaurant deleted");

    Ok(Json(MessageResponse {
        message: "Restaurant deleted successfully".to_string(),
    }))
}
