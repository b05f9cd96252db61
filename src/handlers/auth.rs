/// Registration and login handlers
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo::{self, ProfileFields};
use crate::error::{is_unique_violation, AppError};
use crate::security::{jwt, password};
use crate::validators;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub picture_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Validate the optional profile fields shared by register and profile
/// update; the error names the offending field.
pub(crate) fn validate_profile_fields(profile: &ProfileFields) -> Result<(), AppError> {
    if let Some(email) = &profile.email {
        if !validators::validate_email(email) {
            return Err(AppError::Validation(
                "email must be a valid address of at most 100 characters".to_string(),
            ));
        }
    }
    if let Some(bio) = &profile.bio {
        if !validators::validate_bio(bio) {
            return Err(AppError::Validation(
                "bio must be at most 200 characters".to_string(),
            ));
        }
    }
    if let Some(mobile) = &profile.mobile {
        if !validators::validate_mobile(mobile) {
            return Err(AppError::Validation(
                "mobile must be 10 to 15 digits".to_string(),
            ));
        }
    }
    if let Some(url) = &profile.picture_url {
        if !validators::validate_picture_url(url) {
            return Err(AppError::Validation(
                "picture_url must start with http:// or https://".to_string(),
            ));
        }
    }
    Ok(())
}

/// POST /register
pub async fn register(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }
    if !validators::validate_username(&payload.username) {
        return Err(AppError::Validation(
            "username must be 3 to 30 word characters".to_string(),
        ));
    }

    let profile = ProfileFields {
        email: payload.email.clone(),
        bio: payload.bio.clone(),
        mobile: payload.mobile.clone(),
        picture_url: payload.picture_url.clone(),
    };
    validate_profile_fields(&profile)?;

    let password_hash = password::hash_password(&payload.password)?;

    let user = user_repo::create_user(&pool, &payload.username, &password_hash, &profile)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("username already exists".to_string())
            } else {
                AppError::Database(e)
            }
        })?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        id: user.id,
        username: user.username,
    }))
}

/// POST /login
pub async fn login(
    pool: web::Data<PgPool>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "username and password are required".to_string(),
        ));
    }

    // The same rejection for unknown user and wrong password; do not leak
    // which one failed.
    let user = user_repo::find_by_username(&pool, &payload.username)
        .await?
        .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

    password::verify_password(&payload.password, &user.password_hash)?;

    let token = jwt::generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
