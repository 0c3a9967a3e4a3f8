use sqlx::SqlitePool;

use crate::models::PopularityNotificationRow;

pub struct NewNotification<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub like_count: i64,
    pub recipient: &'a str,
}

const SQL_FIND_FOR_USER: &str = r#"
SELECT id, user_id, like_count, recipient, sent_at
FROM popularity_notifications
WHERE user_id = ?1
LIMIT 1
"#;

pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Option<PopularityNotificationRow>> {
    sqlx::query_as::<_, PopularityNotificationRow>(SQL_FIND_FOR_USER)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn exists_for_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<bool> {
    Ok(find_for_user(pool, user_id).await?.is_some())
}

const SQL_INSERT_NOTIFICATION: &str = r#"
INSERT INTO popularity_notifications (id, user_id, like_count, recipient, sent_at)
VALUES (?1, ?2, ?3, ?4, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
"#;

pub async fn insert(pool: &SqlitePool, notification: NewNotification<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_NOTIFICATION)
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.like_count)
        .bind(notification.recipient)
        .execute(pool)
        .await?;
    Ok(())
}

// Back-fill scan: everyone at or over the threshold who has never been
// alerted on. Re-running is idempotent, notified users drop out of the
// result set.
const SQL_POPULAR_WITHOUT_NOTIFICATION: &str = r#"
SELECT u.id, COUNT(p.id) AS like_count
FROM users u
JOIN preferences p ON p.target_id = u.id AND p.polarity = 'like'
LEFT JOIN popularity_notifications n ON n.user_id = u.id
WHERE n.id IS NULL
GROUP BY u.id
HAVING COUNT(p.id) >= ?1
ORDER BY like_count DESC
"#;

pub async fn popular_users_without_notification(
    pool: &SqlitePool,
    threshold: i64,
) -> sqlx::Result<Vec<(String, i64)>> {
    sqlx::query_as::<_, (String, i64)>(SQL_POPULAR_WITHOUT_NOTIFICATION)
        .bind(threshold)
        .fetch_all(pool)
        .await
}
