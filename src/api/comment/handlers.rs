use crate::api::models::*;
use crate::api::restaurant::handlers::load_restaurant;
use crate::storage::Comment;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

pub async fn add_comment_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddCommentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let Json(request) = payload?;

    let Some(restaurant_id) = request.restaurant_id else {
        return Err(AppError::restaurant_not_found());
    };
    let restaurant = load_restaurant(&state, &restaurant_id).await?;

    let comment = state
        .store
        .attach_comment(&restaurant.key, request.comment_data)
        .await?;

    info!(
        restaurant_id = %restaurant.key,
        comment_id = %comment.key,
        "Comment attached"
    );

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn restaurant_comments_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, AppError> {
    let restaurant = load_restaurant(&state, &id).await?;
    let comments = state
        .store
        .find_comments_by_restaurant(&restaurant.key)
        .await?;
    Ok(Json(comments))
}
