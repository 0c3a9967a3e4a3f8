pub mod candidates;
pub mod notifications;
pub mod pagination;
pub mod preferences;
pub mod users;

pub use candidates::{CandidateRow, LikedUserRow};
pub use notifications::PopularityNotificationRow;
pub use pagination::PageMeta;
pub use preferences::{Polarity, PreferenceRow};
pub use users::{UserProfile, UserRow};
