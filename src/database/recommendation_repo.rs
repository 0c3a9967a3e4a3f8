use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::CandidateRow;

#[derive(Debug, Default)]
pub struct CandidateFilter<'a> {
    pub gender: Option<&'a str>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
}

// Shared WHERE clause for the count and the page query, so `total` in the
// pagination meta always reflects the same filtered/excluded pool.
fn push_pool_conditions<'a>(
    builder: &mut QueryBuilder<'a, Sqlite>,
    user_id: &'a str,
    exclude_ids: &'a [String],
    filter: &CandidateFilter<'a>,
) {
    builder.push(" FROM users WHERE is_active = 1 AND id != ");
    builder.push_bind(user_id);

    if !exclude_ids.is_empty() {
        builder.push(" AND id NOT IN (");
        let mut separated = builder.separated(", ");
        for id in exclude_ids {
            separated.push_bind(id.as_str());
        }
        builder.push(")");
    }

    if let Some(gender) = filter.gender {
        builder.push(" AND gender = ");
        builder.push_bind(gender);
    }
    if let Some(min_age) = filter.min_age {
        builder.push(" AND age >= ");
        builder.push_bind(min_age);
    }
    if let Some(max_age) = filter.max_age {
        builder.push(" AND age <= ");
        builder.push_bind(max_age);
    }
}

pub async fn count_candidates(
    pool: &SqlitePool,
    user_id: &str,
    exclude_ids: &[String],
    filter: &CandidateFilter<'_>,
) -> sqlx::Result<i64> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*)");
    push_pool_conditions(&mut builder, user_id, exclude_ids, filter);
    builder.build_query_scalar().fetch_one(pool).await
}

/// Loads one page of eligible candidates in a fresh random order.
/// Ordering is deliberately not stable across calls.
pub async fn load_candidate_page(
    pool: &SqlitePool,
    user_id: &str,
    exclude_ids: &[String],
    filter: &CandidateFilter<'_>,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<CandidateRow>> {
    let mut builder =
        QueryBuilder::new("SELECT id, name, age, gender, bio, location, latitude, longitude");
    push_pool_conditions(&mut builder, user_id, exclude_ids, filter);
    builder.push(" ORDER BY RANDOM() LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);

    builder.build_query_as::<CandidateRow>().fetch_all(pool).await
}
