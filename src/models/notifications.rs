#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PopularityNotificationRow {
    pub id: String,
    pub user_id: String,
    pub like_count: i64,
    pub recipient: String,
    pub sent_at: String,
}
