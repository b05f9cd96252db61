use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lumen::db::{create_pool, run_migrations};
use lumen::security::jwt;
use lumen::{routes, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    jwt::initialize_keys(&config.jwt.secret, config.jwt.access_ttl_secs)
        .context("failed to initialize JWT keys")?;

    let pool = create_pool(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;

    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let bind_addr = (config.app.host.clone(), config.app.port);
    info!("Starting lumen on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .configure(routes::configure_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
    .context("HTTP server failed")
}
