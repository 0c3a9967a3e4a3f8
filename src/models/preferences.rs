use std::fmt;

/// Like or dislike. A given (actor, target) pair holds at most one of the
/// two at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Like,
    Dislike,
}

impl Polarity {
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Like => "like",
            Polarity::Dislike => "dislike",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Polarity::Like => Polarity::Dislike,
            Polarity::Dislike => Polarity::Like,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PreferenceRow {
    pub id: String,
    pub actor_id: String,
    pub target_id: String,
    pub polarity: String,
    pub created_at: String,
}
