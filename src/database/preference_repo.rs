use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{LikedUserRow, Polarity, PreferenceRow};

const SQL_PREFERENCE_EXISTS: &str = r#"
SELECT COUNT(*)
FROM preferences
WHERE actor_id = ?1 AND target_id = ?2 AND polarity = ?3
"#;

pub async fn exists<'e, E>(
    executor: E,
    actor_id: &str,
    target_id: &str,
    polarity: Polarity,
) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar(SQL_PREFERENCE_EXISTS)
        .bind(actor_id)
        .bind(target_id)
        .bind(polarity.as_str())
        .fetch_one(executor)
        .await?;
    Ok(count > 0)
}

// RETURNING keeps the stored created_at authoritative; the row is always
// freshly inserted, a polarity flip never updates in place.
const SQL_INSERT_PREFERENCE: &str = r#"
INSERT INTO preferences (id, actor_id, target_id, polarity)
VALUES (?1, ?2, ?3, ?4)
RETURNING id, actor_id, target_id, polarity, created_at
"#;

pub async fn insert<'e, E>(
    executor: E,
    id: &str,
    actor_id: &str,
    target_id: &str,
    polarity: Polarity,
) -> sqlx::Result<PreferenceRow>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, PreferenceRow>(SQL_INSERT_PREFERENCE)
        .bind(id)
        .bind(actor_id)
        .bind(target_id)
        .bind(polarity.as_str())
        .fetch_one(executor)
        .await
}

const SQL_DELETE_PREFERENCE: &str = r#"
DELETE FROM preferences
WHERE actor_id = ?1 AND target_id = ?2 AND polarity = ?3
"#;

pub async fn delete<'e, E>(
    executor: E,
    actor_id: &str,
    target_id: &str,
    polarity: Polarity,
) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(SQL_DELETE_PREFERENCE)
        .bind(actor_id)
        .bind(target_id)
        .bind(polarity.as_str())
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

const SQL_COUNT_RECEIVED_LIKES: &str = r#"
SELECT COUNT(*)
FROM preferences
WHERE target_id = ?1 AND polarity = 'like'
"#;

pub async fn count_received_likes(pool: &SqlitePool, target_id: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(SQL_COUNT_RECEIVED_LIKES)
        .bind(target_id)
        .fetch_one(pool)
        .await
}

const SQL_COUNT_BY_ACTOR: &str = r#"
SELECT COUNT(*)
FROM preferences
WHERE actor_id = ?1 AND polarity = ?2
"#;

pub async fn count_by_actor(
    pool: &SqlitePool,
    actor_id: &str,
    polarity: Polarity,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(SQL_COUNT_BY_ACTOR)
        .bind(actor_id)
        .bind(polarity.as_str())
        .fetch_one(pool)
        .await
}

const SQL_LIST_TARGET_IDS: &str = r#"
SELECT target_id
FROM preferences
WHERE actor_id = ?1 AND polarity = ?2
"#;

/// Target ids the actor already acted on, used to build exclusion sets.
pub async fn list_target_ids(
    pool: &SqlitePool,
    actor_id: &str,
    polarity: Polarity,
) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar(SQL_LIST_TARGET_IDS)
        .bind(actor_id)
        .bind(polarity.as_str())
        .fetch_all(pool)
        .await
}

const SQL_LIKED_USERS_PAGE: &str = r#"
SELECT
    u.id, u.name, u.age, u.gender, u.bio, u.location, u.latitude, u.longitude,
    p.created_at AS liked_at
FROM users u
JOIN preferences p ON p.target_id = u.id
WHERE p.actor_id = ?1 AND p.polarity = 'like'
ORDER BY p.created_at DESC
LIMIT ?2 OFFSET ?3
"#;

pub async fn liked_users_page(
    pool: &SqlitePool,
    actor_id: &str,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<LikedUserRow>> {
    sqlx::query_as::<_, LikedUserRow>(SQL_LIKED_USERS_PAGE)
        .bind(actor_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
}
