//! Field lookups: distinct values across all restaurants, and the same
//! fields read off a single restaurant.

use crate::api::models::*;
use crate::api::restaurant::handlers::load_restaurant;
use crate::storage::Tag;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

pub async fn tags_handler(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let tags = state.store.distinct_tag_names().await?;
    debug!(count = tags.len(), "Distinct tags");
    Ok(Json(tags))
}

pub async fn cities_handler(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let cities = state.store.distinct_city_names().await?;
    debug!(count = cities.len(), "Distinct cities");
    Ok(Json(cities))
}

pub async fn img_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let urls = state.store.distinct_img_urls().await?;
    debug!(count = urls.len(), "Distinct image URLs");
    Ok(Json(urls))
}

pub async fn restaurant_tags_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let restaurant = load_restaurant(&state, &id).await?;
    Ok(Json(restaurant.tags))
}

pub async fn restaurant_city_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CityResponse>, AppError> {
    let restaurant = load_restaurant(&state, &id).await?;
    Ok(Json(CityResponse {
        city: restaurant.city_name,
    }))
}

pub async fn restaurant_img_url_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ImgUrlResponse>, AppError> {
    let restaurant = load_restaurant(&state, &id).await?;
    Ok(Json(ImgUrlResponse {
        img_url: restaurant.img_url,
    }))
}
