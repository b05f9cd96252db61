/// Read-side aggregation: derived counts over likes, comments and follows.
///
/// Counts are never stored redundantly; listings are annotated in a single
/// batched pass so N posts never cost N extra count queries.
use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::social_repo;
use crate::models::{GraphCounts, PostEngagement};

/// Like and comment counts for a set of posts, one grouped query per
/// relation. An empty id set returns an empty map without touching the
/// database.
pub async fn engagement_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, PostEngagement>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let like_rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT post_id, COUNT(*)
        FROM likes
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    let comment_rows: Vec<(Uuid, i64)> = sqlx::query_as(
        r#"
        SELECT post_id, COUNT(*)
        FROM comments
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(merge_engagement(post_ids, &like_rows, &comment_rows))
}

/// Follower/following counts for a single user.
pub async fn graph_counts_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<GraphCounts, sqlx::Error> {
    let (follower_count, following_count) = tokio::try_join!(
        social_repo::follower_count(pool, user_id),
        social_repo::following_count(pool, user_id),
    )?;

    Ok(GraphCounts {
        follower_count,
        following_count,
    })
}

/// Merge grouped count rows back onto the requested id set. Posts with no
/// engagement rows get explicit zero counts.
fn merge_engagement(
    post_ids: &[Uuid],
    like_rows: &[(Uuid, i64)],
    comment_rows: &[(Uuid, i64)],
) -> HashMap<Uuid, PostEngagement> {
    let mut counts: HashMap<Uuid, PostEngagement> = post_ids
        .iter()
        .map(|id| (*id, PostEngagement::default()))
        .collect();

    for (post_id, likes) in like_rows {
        if let Some(entry) = counts.get_mut(post_id) {
            entry.like_count = *likes;
        }
    }
    for (post_id, comments) in comment_rows {
        if let Some(entry) = counts.get_mut(post_id) {
            entry.comment_count = *comments;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_fills_zero_counts() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let counts = merge_engagement(&[a, b], &[(a, 3)], &[]);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&a].like_count, 3);
        assert_eq!(counts[&a].comment_count, 0);
        assert_eq!(counts[&b].like_count, 0);
        assert_eq!(counts[&b].comment_count, 0);
    }

    #[test]
    fn test_merge_combines_both_relations() {
        let a = Uuid::new_v4();

        let counts = merge_engagement(&[a], &[(a, 1)], &[(a, 7)]);

        assert_eq!(counts[&a].like_count, 1);
        assert_eq!(counts[&a].comment_count, 7);
    }

    #[test]
    fn test_merge_ignores_rows_outside_requested_set() {
        let a = Uuid::new_v4();
        let stray = Uuid::new_v4();

        let counts = merge_engagement(&[a], &[(stray, 9)], &[(stray, 9)]);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[&a].like_count, 0);
        assert_eq!(counts[&a].comment_count, 0);
    }

    #[test]
    fn test_merge_empty_input() {
        let counts = merge_engagement(&[], &[], &[]);
        assert!(counts.is_empty());
    }
}
