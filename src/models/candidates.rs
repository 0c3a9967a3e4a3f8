use serde::Serialize;

// View-model row for recommendation and liked-users listings.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CandidateRow {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LikedUserRow {
    pub id: String,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub liked_at: String,
}
