use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;

use sparkmatch::config::Config;
use sparkmatch::services::mailer::HttpMailer;
use sparkmatch::services::popularity_service;
use sparkmatch::state::AppState;

// Back-fill/recovery for popularity alerts that were dropped on the
// per-like path. Safe to re-run on any schedule; already-notified users
// are never alerted again.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::load();
    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("Cannot connect to DB");

    let dry_run = env::var("DRY_RUN").is_ok_and(|v| v == "1" || v == "true");
    if dry_run {
        println!("[DRY RUN] no notifications will be sent");
    }

    let state = AppState {
        pool,
        mailer: Arc::new(HttpMailer::new(&config)),
        config: Arc::new(config),
    };

    match popularity_service::scan_popular_users(&state, dry_run).await {
        Ok(report) => {
            println!(
                "popularity scan: candidates={}, notified={}, failed={}",
                report.candidates, report.notified, report.failed
            );
        }
        Err(e) => {
            eprintln!("popularity scan failed: {}", e);
            std::process::exit(1);
        }
    }
}
