use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row joined with its author's username, as served by post listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostWithAuthor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub content: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's username.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Public display fields for follower/following listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GraphMember {
    pub id: Uuid,
    pub username: String,
    pub picture_url: Option<String>,
}

/// Read-time engagement counts for a post, derived from likes and comments.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PostEngagement {
    pub like_count: i64,
    pub comment_count: i64,
}

/// Read-time follow-graph counts for a user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GraphCounts {
    pub follower_count: i64,
    pub following_count: i64,
}
