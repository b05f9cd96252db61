/// Social graph repository - directed follow edges between users
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::GraphMember;

/// Conditional insert of a follow edge. Returns the number of rows written:
/// 0 means the pair already exists and the caller must surface it as a
/// conflict, not silent success. Self-follows are rejected before this call.
pub async fn follow(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO follows (follower_id, following_id, created_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (follower_id, following_id) DO NOTHING
        "#,
    )
    .bind(follower_id)
    .bind(following_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Remove a follow edge. Returns 0 when no such edge existed.
pub async fn unfollow(
    pool: &PgPool,
    follower_id: Uuid,
    following_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Users following `user_id`, most recent edge first.
pub async fn followers(pool: &PgPool, user_id: Uuid) -> Result<Vec<GraphMember>, sqlx::Error> {
    sqlx::query_as::<_, GraphMember>(
        r#"
        SELECT u.id, u.username, u.picture_url
        FROM follows f
        JOIN users u ON u.id = f.follower_id
        WHERE f.following_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Users that `user_id` follows, most recent edge first.
pub async fn following(pool: &PgPool, user_id: Uuid) -> Result<Vec<GraphMember>, sqlx::Error> {
    sqlx::query_as::<_, GraphMember>(
        r#"
        SELECT u.id, u.username, u.picture_url
        FROM follows f
        JOIN users u ON u.id = f.following_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn follower_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE following_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

pub async fn following_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
