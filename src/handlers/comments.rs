/// Comment handlers
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo};
use crate::error::AppError;
use crate::middleware::UserId;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

/// POST /posts/{id}/comments
///
/// The parent post must exist at creation time; comments are immutable
/// afterwards.
pub async fn create_comment(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
    payload: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    if payload.content.is_empty() {
        return Err(AppError::Validation("content is required".to_string()));
    }

    post_repo::find_post_by_id(&pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let comment = comment_repo::create_comment(&pool, post_id, user.0, &payload.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// GET /posts/{id}/comments
pub async fn list_comments(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let comments = comment_repo::list_comments_for_post(&pool, post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}
