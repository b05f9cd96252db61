/// Like repository - conditional writes against the (post_id, user_id)
/// uniqueness constraint
use chrono::Utc;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Conditional insert. Returns the number of rows written: 0 means the
/// (post, user) pair already exists, which the caller must surface as a
/// conflict rather than silent success.
pub async fn create_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO likes (id, post_id, user_id, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (post_id, user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Delete a like. Returns 0 when no such like existed.
pub async fn delete_like(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Check if a user has liked a post
pub async fn has_liked(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)")
        .bind(post_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<bool, _>(0))
}

/// Count likes for a post
pub async fn count_likes_for_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await
}
