/// Post handlers: creation, listing with engagement counts, owner-scoped
/// edit and delete
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::post_repo;
use crate::error::AppError;
use crate::middleware::UserId;
use crate::models::{Post, PostEngagement, PostWithAuthor};
use crate::services::aggregation;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub content: String,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
}

impl PostResponse {
    fn new(post: PostWithAuthor, engagement: PostEngagement) -> Self {
        PostResponse {
            id: post.id,
            user_id: post.user_id,
            username: post.username,
            title: post.title,
            content: post.content,
            photo_url: post.photo_url,
            created_at: post.created_at,
            updated_at: post.updated_at,
            like_count: engagement.like_count,
            comment_count: engagement.comment_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, AppError> {
    if payload.title.is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if payload.content.is_empty() {
        return Err(AppError::Validation("content is required".to_string()));
    }

    let photo_url = payload
        .photo_url
        .as_deref()
        .filter(|url| !url.is_empty());

    let post = post_repo::create_post(&pool, user.0, &payload.title, &payload.content, photo_url)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// GET /posts
///
/// Newest first; engagement counts come from one batched aggregation pass,
/// not one query per post.
pub async fn list_posts(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let posts = post_repo::list_posts(&pool).await?;
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let engagement = aggregation::engagement_for_posts(&pool, &ids).await?;

    let response: Vec<PostResponse> = posts
        .into_iter()
        .map(|p| {
            let counts = engagement.get(&p.id).copied().unwrap_or_default();
            PostResponse::new(p, counts)
        })
        .collect();

    Ok(HttpResponse::Ok().json(response))
}

/// GET /posts/{id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    let post = post_repo::find_post_with_author(&pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let engagement = aggregation::engagement_for_posts(&pool, &[post_id]).await?;
    let counts = engagement.get(&post_id).copied().unwrap_or_default();

    Ok(HttpResponse::Ok().json(PostResponse::new(post, counts)))
}

/// Fetch the post and decide NotFound vs Forbidden for the requester.
/// NotFound is checked first: a missing resource is never reported as an
/// ownership failure.
async fn find_owned_post(
    pool: &PgPool,
    post_id: Uuid,
    requester: Uuid,
) -> Result<Post, AppError> {
    let post = post_repo::find_post_by_id(pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    if post.user_id != requester {
        return Err(AppError::Authorization(
            "you do not own this post".to_string(),
        ));
    }

    Ok(post)
}

/// PUT /posts/{id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
    payload: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    if payload.title.is_none() && payload.content.is_none() {
        return Err(AppError::Validation(
            "title or content is required".to_string(),
        ));
    }
    if payload.title.as_deref() == Some("") {
        return Err(AppError::Validation("title must not be empty".to_string()));
    }
    if payload.content.as_deref() == Some("") {
        return Err(AppError::Validation(
            "content must not be empty".to_string(),
        ));
    }

    find_owned_post(&pool, post_id, user.0).await?;

    // The update is still owner-qualified; a post deleted in between simply
    // affects zero rows.
    let updated = post_repo::update_post(
        &pool,
        post_id,
        user.0,
        payload.title.as_deref(),
        payload.content.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /posts/{id}
///
/// No cascade: comments and likes on the post stay behind.
pub async fn delete_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    find_owned_post(&pool, post_id, user.0).await?;

    let removed = post_repo::delete_post(&pool, post_id, user.0).await?;
    if removed == 0 {
        return Err(AppError::NotFound("post not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "post deleted".to_string(),
    }))
}
