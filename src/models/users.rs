use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i64,
    pub gender: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: i64,
    pub created_at: String,
}

/// Outward-facing profile, without credential fields.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub gender: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            age: row.age,
            gender: row.gender,
            bio: row.bio,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        }
    }
}
