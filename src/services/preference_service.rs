use uuid::Uuid;

use crate::database::{preference_repo, user_repo};
use crate::error::{is_unique_violation, AppError};
use crate::models::{LikedUserRow, PageMeta, Polarity, PreferenceRow};
use crate::state::AppState;
use crate::services::popularity_service;

/// Records a like or dislike from `actor_id` on `target_id`.
///
/// A preference of the same polarity is rejected as a duplicate; one of the
/// opposite polarity is retracted and replaced. The duplicate check, the
/// retraction and the insert run in one transaction, with the unique
/// (actor, target) index as the backstop for concurrent calls on the same
/// pair.
pub async fn record_preference(
    state: &AppState,
    actor_id: &str,
    target_id: &str,
    polarity: Polarity,
) -> Result<PreferenceRow, AppError> {
    if actor_id == target_id {
        return Err(AppError::SelfReference(polarity));
    }

    let Some(target) = user_repo::find_active_user(&state.pool, target_id).await? else {
        return Err(AppError::NotFound);
    };

    let mut tx = state.pool.begin().await?;

    if preference_repo::exists(&mut *tx, actor_id, target_id, polarity).await? {
        return Err(AppError::Duplicate(polarity));
    }

    // The user changed their mind: drop the opposite row before inserting.
    if preference_repo::exists(&mut *tx, actor_id, target_id, polarity.opposite()).await? {
        preference_repo::delete(&mut *tx, actor_id, target_id, polarity.opposite()).await?;
    }

    let id = Uuid::new_v4().to_string();
    let row = match preference_repo::insert(&mut *tx, &id, actor_id, target_id, polarity).await {
        Ok(row) => row,
        Err(e) if is_unique_violation(&e) => return Err(AppError::Conflict),
        Err(e) => return Err(e.into()),
    };

    tx.commit().await?;

    // The received-like count is only meaningful right after a new like.
    if polarity == Polarity::Like {
        popularity_service::check_and_notify(state, &target).await;
    }

    Ok(row)
}

pub struct LikedUsersPage {
    pub users: Vec<LikedUserRow>,
    pub meta: PageMeta,
}

/// Users the actor has liked, newest like first.
pub async fn liked_users(
    state: &AppState,
    actor_id: &str,
    page: i64,
    per_page: i64,
) -> Result<LikedUsersPage, AppError> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, 100);

    let total = preference_repo::count_by_actor(&state.pool, actor_id, Polarity::Like).await?;
    let users =
        preference_repo::liked_users_page(&state.pool, actor_id, per_page, (page - 1) * per_page)
            .await?;

    Ok(LikedUsersPage {
        users,
        meta: PageMeta::new(page, per_page, total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_util::{insert_user, test_state};

    async fn pair_count(state: &AppState, actor: &str, target: &str) -> i64 {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM preferences WHERE actor_id = ?1 AND target_id = ?2",
        )
        .bind(actor)
        .bind(target)
        .fetch_one(&state.pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_like_is_rejected_and_pair_stays_unique() {
        let (state, _mailer) = test_state(50).await;
        let a = insert_user(&state.pool, "Anna", 28, "female", true).await;
        let b = insert_user(&state.pool, "Ben", 30, "male", true).await;

        record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap();
        let err = record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate(Polarity::Like)));
        assert_eq!(pair_count(&state, &a, &b).await, 1);
    }

    #[tokio::test]
    async fn opposite_polarity_replaces_existing_row() {
        let (state, _mailer) = test_state(50).await;
        let a = insert_user(&state.pool, "Anna", 28, "female", true).await;
        let b = insert_user(&state.pool, "Ben", 30, "male", true).await;

        record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap();
        let row = record_preference(&state, &a, &b, Polarity::Dislike)
            .await
            .unwrap();
        assert_eq!(row.polarity, "dislike");
        assert_eq!(pair_count(&state, &a, &b).await, 1);

        let stored: String = sqlx::query_scalar(
            "SELECT polarity FROM preferences WHERE actor_id = ?1 AND target_id = ?2",
        )
        .bind(&a)
        .bind(&b)
        .fetch_one(&state.pool)
        .await
        .unwrap();
        assert_eq!(stored, "dislike");
    }

    #[tokio::test]
    async fn self_preference_is_rejected() {
        let (state, _mailer) = test_state(50).await;
        let a = insert_user(&state.pool, "Anna", 28, "female", true).await;

        let err = record_preference(&state, &a, &a, Polarity::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SelfReference(Polarity::Like)));

        let err = record_preference(&state, &a, &a, Polarity::Dislike)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::SelfReference(Polarity::Dislike)));
    }

    #[tokio::test]
    async fn missing_or_inactive_target_is_not_found() {
        let (state, _mailer) = test_state(50).await;
        let a = insert_user(&state.pool, "Anna", 28, "female", true).await;
        let ghost = insert_user(&state.pool, "Ghost", 40, "other", false).await;

        let err = record_preference(&state, &a, "no-such-user", Polarity::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        let err = record_preference(&state, &a, &ghost, Polarity::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn like_dislike_like_round_trip() {
        let (state, _mailer) = test_state(50).await;
        let a = insert_user(&state.pool, "Anna", 28, "female", true).await;
        let b = insert_user(&state.pool, "Ben", 30, "male", true).await;

        record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap();
        let err = record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);

        record_preference(&state, &a, &b, Polarity::Dislike)
            .await
            .unwrap();
        let row = record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap();
        assert_eq!(row.polarity, "like");
        assert_eq!(pair_count(&state, &a, &b).await, 1);
    }

    #[tokio::test]
    async fn liked_users_pages_newest_first() {
        let (state, _mailer) = test_state(50).await;
        let a = insert_user(&state.pool, "Anna", 28, "female", true).await;
        let b = insert_user(&state.pool, "Ben", 30, "male", true).await;
        let c = insert_user(&state.pool, "Cleo", 26, "female", true).await;

        record_preference(&state, &a, &b, Polarity::Like)
            .await
            .unwrap();
        record_preference(&state, &a, &c, Polarity::Like)
            .await
            .unwrap();

        let page = liked_users(&state, &a, 1, 20).await.unwrap();
        assert_eq!(page.meta.total, 2);
        assert_eq!(page.meta.last_page, 1);
        assert_eq!(page.users.len(), 2);
        let ids: Vec<&str> = page.users.iter().map(|u| u.id.as_str()).collect();
        assert!(ids.contains(&b.as_str()));
        assert!(ids.contains(&c.as_str()));
    }
}
