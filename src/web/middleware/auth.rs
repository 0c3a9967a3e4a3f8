use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::database::auth_token_repo;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string());

    if let Some(token) = token {
        match auth_token_repo::find_user_id(&state.pool, &token).await {
            Ok(Some(user_id)) => {
                // Inject user id into request extensions
                request.extensions_mut().insert(AuthenticatedUser { id: user_id });
                return next.run(request).await;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("token lookup failed: {}", e);
                return AppError::Database(e).into_response();
            }
        }
    }

    AppError::Unauthorized.into_response()
}

/// The raw bearer token, needed by logout to revoke itself.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
