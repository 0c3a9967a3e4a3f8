pub mod middleware;
pub mod routes;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::state::AppState;
use crate::web::middleware::auth as auth_middleware;
use crate::web::routes::{auth, people};

pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/me", get(auth::me_handler))
        .route("/people/recommended", get(people::recommended_handler))
        .route("/people/:id/like", post(people::like_handler))
        .route("/people/:id/dislike", post(people::dislike_handler))
        .route("/people/liked", get(people::liked_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    Router::new()
        // Public routes
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler))
        // Protected routes
        .merge(protected_routes)
        // Layers
        .layer(CatchPanicLayer::new())
        // State
        .with_state(state)
}
