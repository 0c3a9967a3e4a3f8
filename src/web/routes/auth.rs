use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::services::auth_service;
use crate::state::AppState;
use crate::web::middleware::auth::{bearer_token, AuthenticatedUser};

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i64,
    pub gender: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let session = auth_service::register(
        &state,
        auth_service::RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            age: body.age,
            gender: body.gender,
            bio: body.bio,
            location: body.location,
            latitude: body.latitude,
            longitude: body.longitude,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "data": { "user": session.user, "token": session.token },
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>, AppError> {
    let session = auth_service::login(&state, &body.email, &body.password).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "data": { "user": session.user, "token": session.token },
    })))
}

pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    if let Some(token) = bearer_token(&headers) {
        auth_service::logout(&state, token).await?;
    }

    Ok(Json(json!({
        "success": true,
        "message": "Logged out successfully",
    })))
}

pub async fn me_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let profile = auth_service::current_user(&state, &auth_user.id).await?;

    Ok(Json(json!({
        "success": true,
        "data": profile,
    })))
}
