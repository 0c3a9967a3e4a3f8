pub mod auth_service;
pub mod mailer;
pub mod notification_service;
pub mod popularity_service;
pub mod preference_service;
pub mod recommendation_service;

#[cfg(test)]
pub mod test_util;
