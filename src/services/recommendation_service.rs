use serde::Deserialize;

use crate::database::{preference_repo, recommendation_repo};
use crate::database::recommendation_repo::CandidateFilter;
use crate::error::AppError;
use crate::models::{CandidateRow, PageMeta, Polarity};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct RecommendedQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub gender: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
}

#[derive(Debug)]
pub struct RecommendationPage {
    pub users: Vec<CandidateRow>,
    pub meta: PageMeta,
}

/// Picks a randomized page of eligible candidates for the user.
///
/// Eligible means active, not the requester, not already liked or disliked,
/// and matching whichever filters were given. Order is re-randomized on
/// every call; browsing pages is best-effort sampling, not a stable list.
pub async fn recommended_users(
    state: &AppState,
    user_id: &str,
    query: &RecommendedQuery,
) -> Result<RecommendationPage, AppError> {
    let (page, per_page) = validate_paging(query)?;
    let filter = validate_filters(query)?;

    let mut exclude_ids =
        preference_repo::list_target_ids(&state.pool, user_id, Polarity::Like).await?;
    exclude_ids
        .extend(preference_repo::list_target_ids(&state.pool, user_id, Polarity::Dislike).await?);

    let total =
        recommendation_repo::count_candidates(&state.pool, user_id, &exclude_ids, &filter).await?;
    let users = recommendation_repo::load_candidate_page(
        &state.pool,
        user_id,
        &exclude_ids,
        &filter,
        per_page,
        (page - 1) * per_page,
    )
    .await?;

    Ok(RecommendationPage {
        users,
        meta: PageMeta::new(page, per_page, total),
    })
}

fn validate_paging(query: &RecommendedQuery) -> Result<(i64, i64), AppError> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(20);

    if page < 1 {
        return Err(AppError::Validation("page must be at least 1".into()));
    }
    if !(1..=100).contains(&per_page) {
        return Err(AppError::Validation(
            "per_page must be between 1 and 100".into(),
        ));
    }
    Ok((page, per_page))
}

fn validate_filters<'q>(query: &'q RecommendedQuery) -> Result<CandidateFilter<'q>, AppError> {
    if let Some(gender) = query.gender.as_deref() {
        if !matches!(gender, "male" | "female" | "other") {
            return Err(AppError::Validation(
                "gender must be male, female or other".into(),
            ));
        }
    }
    if let Some(min_age) = query.min_age {
        if min_age < 18 {
            return Err(AppError::Validation("min_age must be at least 18".into()));
        }
    }
    if let Some(max_age) = query.max_age {
        if max_age > 100 {
            return Err(AppError::Validation("max_age must be 100 or less".into()));
        }
    }

    Ok(CandidateFilter {
        gender: query.gender.as_deref(),
        min_age: query.min_age,
        max_age: query.max_age,
    })
}
