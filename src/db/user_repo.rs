/// User repository - all database operations for users
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Optional profile fields accepted at registration and profile update.
/// A `None` field leaves the stored value unchanged.
#[derive(Debug, Default, Clone)]
pub struct ProfileFields {
    pub email: Option<String>,
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub picture_url: Option<String>,
}

/// Create a new user. A duplicate username surfaces as a unique violation.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    profile: &ProfileFields,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, username, password_hash, email, bio, mobile, picture_url, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, username, password_hash, email, bio, mobile, picture_url, created_at
        "#,
    )
    .bind(id)
    .bind(username)
    .bind(password_hash)
    .bind(&profile.email)
    .bind(&profile.bio)
    .bind(&profile.mobile)
    .bind(&profile.picture_url)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Find a user by username
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, email, bio, mobile, picture_url, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Find a user by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, email, bio, mobile, picture_url, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Partially update profile fields; absent fields keep their prior value.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    profile: &ProfileFields,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET email = COALESCE($2, email),
            bio = COALESCE($3, bio),
            mobile = COALESCE($4, mobile),
            picture_url = COALESCE($5, picture_url)
        WHERE id = $1
        RETURNING id, username, password_hash, email, bio, mobile, picture_url, created_at
        "#,
    )
    .bind(id)
    .bind(&profile.email)
    .bind(&profile.bio)
    .bind(&profile.mobile)
    .bind(&profile.picture_url)
    .fetch_one(pool)
    .await
}
