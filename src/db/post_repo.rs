/// Post repository - creation, listing, owner-scoped mutation
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Post, PostWithAuthor};

pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
    content: &str,
    photo_url: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (id, user_id, title, content, photo_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING id, user_id, title, content, photo_url, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .bind(photo_url)
    .bind(now)
    .fetch_one(pool)
    .await
}

pub async fn find_post_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, title, content, photo_url, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_post_with_author(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.user_id, u.username, p.title, p.content, p.photo_url,
               p.created_at, p.updated_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// All posts, most recent first, joined with their author's username.
pub async fn list_posts(pool: &PgPool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.user_id, u.username, p.title, p.content, p.photo_url,
               p.created_at, p.updated_at
        FROM posts p
        JOIN users u ON u.id = p.user_id
        ORDER BY p.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Owner-scoped partial update. The WHERE clause carries the ownership check
/// so the check-then-act is a single statement; an absent field keeps its
/// prior value and `updated_at` is refreshed on success.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    owner_id: Uuid,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = COALESCE($3, title),
            content = COALESCE($4, content),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, content, photo_url, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(owner_id)
    .bind(title)
    .bind(content)
    .fetch_optional(pool)
    .await
}

/// Owner-scoped delete. Returns the number of rows removed; comments and
/// likes referencing the post are left in place.
pub async fn delete_post(
    pool: &PgPool,
    post_id: Uuid,
    owner_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
