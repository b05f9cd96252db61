//! Route configuration
//!
//! Centralized route setup; each domain configures its own scope.

use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .configure(routes::auth::configure)
        .configure(routes::profile::configure)
        .configure(routes::posts::configure)
        .configure(routes::users::configure);
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod auth {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.route("/register", web::post().to(handlers::register))
                .route("/login", web::post().to(handlers::login));
        }
    }

    pub mod profile {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/profile")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::get().to(handlers::get_profile))
                    .route("", web::put().to(handlers::update_profile)),
            );
        }
    }

    pub mod posts {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/posts")
                    // Public reads
                    .route("", web::get().to(handlers::list_posts))
                    .route("/{id}", web::get().to(handlers::get_post))
                    .route("/{id}/comments", web::get().to(handlers::list_comments))
                    .route("/{id}/likes", web::get().to(handlers::like_status))
                    // Authenticated writes
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("", web::post().to(handlers::create_post))
                            .route("/{id}", web::put().to(handlers::update_post))
                            .route("/{id}", web::delete().to(handlers::delete_post))
                            .route("/{id}/comments", web::post().to(handlers::create_comment))
                            .route("/{id}/like", web::post().to(handlers::like_post))
                            .route("/{id}/like", web::delete().to(handlers::unlike_post)),
                    ),
            );
        }
    }

    pub mod users {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/users")
                    // Public reads
                    .route("/{username}", web::get().to(handlers::get_public_profile))
                    .route(
                        "/{username}/followers",
                        web::get().to(handlers::get_followers),
                    )
                    .route(
                        "/{username}/following",
                        web::get().to(handlers::get_following),
                    )
                    // Authenticated graph writes
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("/{username}/follow", web::post().to(handlers::follow_user))
                            .route(
                                "/{username}/follow",
                                web::delete().to(handlers::unfollow_user),
                            ),
                    ),
            );
        }
    }
}
