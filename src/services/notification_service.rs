use tracing::{info, warn};
use uuid::Uuid;

use crate::database::notification_repo;
use crate::error::{is_unique_violation, AppError};
use crate::models::UserRow;
use crate::state::AppState;

/// Sends the popularity alert and records that it went out.
///
/// The record is written strictly after the confirmed send: a failed send
/// leaves no record, so the batch scan will retry delivery later.
pub async fn notify_admin(state: &AppState, user: &UserRow, like_count: i64) -> Result<(), AppError> {
    let recipient = state.config.admin_email.as_str();
    let subject = format!("User Has Received {} Likes!", like_count);
    let body = popularity_alert_body(user, like_count);

    state.mailer.send(recipient, &subject, &body).await?;
    info!(user_id = %user.id, like_count, "popularity alert sent to {}", recipient);

    let id = Uuid::new_v4().to_string();
    let result = notification_repo::insert(
        &state.pool,
        notification_repo::NewNotification {
            id: &id,
            user_id: &user.id,
            like_count,
            recipient,
        },
    )
    .await;

    match result {
        Ok(()) => Ok(()),
        // Two dispatches raced past the existence check; the extra email is
        // a harmless duplicate, the record stays unique.
        Err(e) if is_unique_violation(&e) => {
            warn!(user_id = %user.id, "popularity alert already recorded, duplicate send");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn popularity_alert_body(user: &UserRow, like_count: i64) -> String {
    format!(
        "Hello Admin,\n\n\
         User {name} (ID: {id}) has received {like_count} likes!\n\n\
         Profile details:\n\
         - Name: {name}\n\
         - Age: {age}\n\
         - Gender: {gender}\n\
         - Location: {location}\n\
         - Total likes: {like_count}\n\
         - Email: {email}\n\n\
         This is an automated notification.\n",
        name = user.name,
        id = user.id,
        age = user.age,
        gender = user.gender,
        location = user.location.as_deref().unwrap_or("Not specified"),
        email = user.email,
    )
}
