use sqlx::SqlitePool;

use crate::models::UserRow;

pub struct NewUser<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: i64,
    pub gender: &'a str,
    pub bio: Option<&'a str>,
    pub location: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

const USER_COLUMNS: &str = r#"
    id,
    name,
    email,
    password_hash,
    age,
    gender,
    bio,
    location,
    latitude,
    longitude,
    is_active,
    created_at
"#;

pub async fn find_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1 LIMIT 1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Like a plain lookup, but deactivated users read as missing. Preference
/// targets must be active.
pub async fn find_active_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1 AND is_active = 1 LIMIT 1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<UserRow>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1 LIMIT 1");
    sqlx::query_as::<_, UserRow>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  id,
  name,
  email,
  password_hash,
  age,
  gender,
  bio,
  location,
  latitude,
  longitude
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub async fn insert_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_USER)
        .bind(user.id)
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.age)
        .bind(user.gender)
        .bind(user.bio)
        .bind(user.location)
        .bind(user.latitude)
        .bind(user.longitude)
        .execute(pool)
        .await?;
    Ok(())
}
