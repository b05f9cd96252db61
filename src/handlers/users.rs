/// Profile and follow-graph handlers
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo::{self, ProfileFields};
use crate::db::social_repo;
use crate::error::AppError;
use crate::handlers::auth::validate_profile_fields;
use crate::middleware::UserId;
use crate::models::User;
use crate::services::aggregation;
use crate::validators;

/// Own profile, as returned by GET/PUT /profile.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(u: User) -> Self {
        ProfileResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            bio: u.bio,
            mobile: u.mobile,
            picture_url: u.picture_url,
            created_at: u.created_at,
        }
    }
}

/// Another user's profile: public fields plus graph counts, no contact data.
#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub follower_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub picture_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub status: String,
}

/// GET /profile
pub async fn get_profile(
    pool: web::Data<PgPool>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let u = user_repo::find_by_id(&pool, user.0)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(u)))
}

/// PUT /profile
///
/// Each supplied field is validated independently before any write; absent
/// fields keep their prior value.
pub async fn update_profile(
    pool: web::Data<PgPool>,
    user: UserId,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = ProfileFields {
        email: payload.email.clone(),
        bio: payload.bio.clone(),
        mobile: payload.mobile.clone(),
        picture_url: payload.picture_url.clone(),
    };
    validate_profile_fields(&profile)?;

    let updated = user_repo::update_profile(&pool, user.0, &profile).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(updated)))
}

fn parse_username(raw: &str) -> Result<&str, AppError> {
    if validators::validate_username(raw) {
        Ok(raw)
    } else {
        Err(AppError::Validation(
            "username must be 3 to 30 word characters".to_string(),
        ))
    }
}

async fn find_by_username_or_404(pool: &PgPool, username: &str) -> Result<User, AppError> {
    user_repo::find_by_username(pool, username)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))
}

/// GET /users/{username}
///
/// Public read: no authentication, profile fields plus follower/following
/// counts computed at read time.
pub async fn get_public_profile(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    parse_username(&username)?;

    let u = find_by_username_or_404(&pool, &username).await?;
    let counts = aggregation::graph_counts_for_user(&pool, u.id).await?;

    Ok(HttpResponse::Ok().json(PublicProfileResponse {
        id: u.id,
        username: u.username,
        bio: u.bio,
        picture_url: u.picture_url,
        created_at: u.created_at,
        follower_count: counts.follower_count,
        following_count: counts.following_count,
    }))
}

/// POST /users/{username}/follow
pub async fn follow_user(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    parse_username(&username)?;

    let target = find_by_username_or_404(&pool, &username).await?;
    if target.id == user.0 {
        return Err(AppError::Validation(
            "you cannot follow yourself".to_string(),
        ));
    }

    let inserted = social_repo::follow(&pool, user.0, target.id).await?;
    if inserted == 0 {
        return Err(AppError::Conflict(
            "already following this user".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(FollowResponse {
        status: "ok".into(),
    }))
}

/// DELETE /users/{username}/follow
pub async fn unfollow_user(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    user: UserId,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    parse_username(&username)?;

    let target = find_by_username_or_404(&pool, &username).await?;
    // Distinct rejection for self-unfollow, even though such an edge can
    // never exist.
    if target.id == user.0 {
        return Err(AppError::Validation(
            "you cannot unfollow yourself".to_string(),
        ));
    }

    let removed = social_repo::unfollow(&pool, user.0, target.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(
            "you are not following this user".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(FollowResponse {
        status: "ok".into(),
    }))
}

/// GET /users/{username}/followers
pub async fn get_followers(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    parse_username(&username)?;

    let u = find_by_username_or_404(&pool, &username).await?;
    let members = social_repo::followers(&pool, u.id).await?;

    Ok(HttpResponse::Ok().json(members))
}

/// GET /users/{username}/following
pub async fn get_following(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    parse_username(&username)?;

    let u = find_by_username_or_404(&pool, &username).await?;
    let members = social_repo::following(&pool, u.id).await?;

    Ok(HttpResponse::Ok().json(members))
}
