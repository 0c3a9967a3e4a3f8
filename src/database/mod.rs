pub mod auth_token_repo;
pub mod notification_repo;
pub mod preference_repo;
pub mod recommendation_repo;
pub mod user_repo;
