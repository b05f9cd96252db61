/// Like handlers: conditional writes plus the public count/status read
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_repo, post_repo};
use crate::error::AppError;
use crate::middleware::UserId;
use crate::security::jwt;

#[derive(Debug, Serialize)]
pub struct LikeActionResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LikeStatusQuery {
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub like_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked: Option<bool>,
}

/// POST /posts/{id}/like
///
/// The uniqueness check and the write are one conditional insert; zero rows
/// affected means the pair already exists and is reported as a conflict.
pub async fn like_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    post_repo::find_post_by_id(&pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

    let inserted = like_repo::create_like(&pool, post_id, user.0).await?;
    if inserted == 0 {
        return Err(AppError::Conflict("already liked this post".to_string()));
    }

    Ok(HttpResponse::Ok().json(LikeActionResponse {
        message: "post liked".to_string(),
    }))
}

/// DELETE /posts/{id}/like
///
/// NotFound here means no such like existed, not that the post is missing.
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    let removed = like_repo::delete_like(&pool, post_id, user.0).await?;
    if removed == 0 {
        return Err(AppError::NotFound(
            "you have not liked this post".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(LikeActionResponse {
        message: "post unliked".to_string(),
    }))
}

/// GET /posts/{id}/likes?user=1
///
/// Public count; `liked` is included only when the caller asks for it and
/// supplies a valid bearer token.
pub async fn like_status(
    req: HttpRequest,
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<LikeStatusQuery>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let like_count = like_repo::count_likes_for_post(&pool, post_id).await?;

    let mut liked = None;
    if query.user.as_deref() == Some("1") {
        if let Some(user_id) = bearer_identity(&req) {
            liked = Some(like_repo::has_liked(&pool, post_id, user_id).await?);
        }
    }

    Ok(HttpResponse::Ok().json(LikeStatusResponse { like_count, liked }))
}

/// Best-effort identity from an optional Authorization header; an absent or
/// invalid credential just means no identity.
fn bearer_identity(req: &HttpRequest) -> Option<Uuid> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    jwt::user_id_from_token(token).ok()
}
