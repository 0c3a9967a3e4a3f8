use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::config::Config;
use crate::services::mailer::RecordingMailer;
use crate::state::AppState;

pub async fn test_pool() -> SqlitePool {
    // Single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    crate::MIGRATOR.run(&pool).await.expect("migrations");
    pool
}

pub fn test_config(threshold: i64) -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        admin_email: "admin@example.com".into(),
        like_notify_threshold: threshold,
        mail_api_url: String::new(),
        mail_api_key: String::new(),
        mail_from: "Sparkmatch <alerts@sparkmatch.app>".into(),
        auth_pepper: "test-pepper".into(),
    }
}

pub async fn test_state(threshold: i64) -> (AppState, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState {
        pool: test_pool().await,
        config: Arc::new(test_config(threshold)),
        mailer: mailer.clone(),
    };
    (state, mailer)
}

pub async fn insert_user(
    pool: &SqlitePool,
    name: &str,
    age: i64,
    gender: &str,
    active: bool,
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, age, gender, is_active)
        VALUES (?1, ?2, ?3, 'x', ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(format!("{}@example.com", Uuid::new_v4()))
    .bind(age)
    .bind(gender)
    .bind(active as i64)
    .execute(pool)
    .await
    .expect("insert test user");
    id
}

pub async fn insert_like(pool: &SqlitePool, actor_id: &str, target_id: &str) {
    sqlx::query(
        r#"
        INSERT INTO preferences (id, actor_id, target_id, polarity)
        VALUES (?1, ?2, ?3, 'like')
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(actor_id)
    .bind(target_id)
    .execute(pool)
    .await
    .expect("insert test like");
}
