use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::Polarity;
use crate::services::preference_service;
use crate::services::recommendation_service::{self, RecommendedQuery};
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn recommended_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(query): Query<RecommendedQuery>,
) -> Result<Json<Value>, AppError> {
    let page = recommendation_service::recommended_users(&state, &auth_user.id, &query).await?;

    Ok(Json(json!({
        "success": true,
        "data": { "data": page.users, "meta": page.meta },
    })))
}

pub async fn like_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(target_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let row =
        preference_service::record_preference(&state, &auth_user.id, &target_id, Polarity::Like)
            .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Successfully liked user",
        "data": { "liked_user_id": row.target_id, "liked_at": row.created_at },
    })))
}

pub async fn dislike_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(target_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let row = preference_service::record_preference(
        &state,
        &auth_user.id,
        &target_id,
        Polarity::Dislike,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Successfully disliked user",
        "data": { "disliked_user_id": row.target_id, "disliked_at": row.created_at },
    })))
}

#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn liked_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Value>, AppError> {
    let page = preference_service::liked_users(
        &state,
        &auth_user.id,
        query.page.unwrap_or(1),
        query.per_page.unwrap_or(20),
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "data": { "data": page.users, "meta": page.meta },
    })))
}
