use sqlx::SqlitePool;

const SQL_INSERT_TOKEN: &str = r#"
INSERT INTO auth_tokens (token, user_id)
VALUES (?1, ?2)
"#;

pub async fn insert_token(pool: &SqlitePool, token: &str, user_id: &str) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_TOKEN)
        .bind(token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

const SQL_FIND_USER_ID: &str = r#"
SELECT user_id
FROM auth_tokens
WHERE token = ?1
"#;

pub async fn find_user_id(pool: &SqlitePool, token: &str) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar(SQL_FIND_USER_ID)
        .bind(token)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_TOKEN: &str = r#"
DELETE FROM auth_tokens
WHERE token = ?1
"#;

pub async fn delete_token(pool: &SqlitePool, token: &str) -> sqlx::Result<bool> {
    let result = sqlx::query(SQL_DELETE_TOKEN)
        .bind(token)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
