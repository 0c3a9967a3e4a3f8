use tracing::{info, warn};

use crate::database::{notification_repo, preference_repo, user_repo};
use crate::error::AppError;
use crate::models::UserRow;
use crate::services::notification_service;
use crate::state::AppState;

/// Called after each new like. Recomputes the target's received-like count
/// and dispatches the one-time admin alert when the threshold is crossed.
///
/// Failures are logged, never surfaced to the request that triggered the
/// like; the batch scan picks up anything that was missed.
pub async fn check_and_notify(state: &AppState, target: &UserRow) {
    if let Err(e) = try_check_and_notify(state, target).await {
        warn!(user_id = %target.id, "popularity check failed: {}", e);
    }
}

async fn try_check_and_notify(state: &AppState, target: &UserRow) -> Result<(), AppError> {
    let count = preference_repo::count_received_likes(&state.pool, &target.id).await?;
    if count < state.config.like_notify_threshold {
        return Ok(());
    }

    // Already alerted once; the count may keep rising, no repeats.
    if notification_repo::exists_for_user(&state.pool, &target.id).await? {
        return Ok(());
    }

    notification_service::notify_admin(state, target, count).await
}

#[derive(Debug, Default)]
pub struct ScanReport {
    pub candidates: usize,
    pub notified: usize,
    pub failed: usize,
}

/// Recovery path for dropped per-like dispatches: scan every user at or
/// over the threshold without a notification record and alert on each.
/// Idempotent, already-notified users never reappear in the scan.
pub async fn scan_popular_users(state: &AppState, dry_run: bool) -> Result<ScanReport, AppError> {
    let threshold = state.config.like_notify_threshold;
    let popular = notification_repo::popular_users_without_notification(&state.pool, threshold).await?;

    let mut report = ScanReport {
        candidates: popular.len(),
        ..ScanReport::default()
    };

    for (user_id, like_count) in popular {
        let Some(user) = user_repo::find_user(&state.pool, &user_id).await? else {
            warn!(user_id = %user_id, "popular user vanished during scan");
            continue;
        };

        if dry_run {
            info!(user_id = %user.id, like_count, "dry run, skipping notification");
            continue;
        }

        match notification_service::notify_admin(state, &user, like_count).await {
            Ok(()) => report.notified += 1,
            Err(e) => {
                warn!(user_id = %user.id, "scan notification failed: {}", e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
