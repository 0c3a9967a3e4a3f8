use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::services::mailer::AlertSender;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn AlertSender>,
}
