//! SwipeNews - backend for a swipe-first short news reader

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swipenews::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxNewsRepository, SqlxPublisherRequestRepository, SqlxUserRepository},
    },
    services::{auth::AuthService, news::NewsService, publisher::PublisherService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swipenews=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SwipeNews backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Wire up repositories and services
    let user_repo = Arc::new(SqlxUserRepository::new(pool.clone()));
    let news_repo = Arc::new(SqlxNewsRepository::new(pool.clone()));
    let request_repo = Arc::new(SqlxPublisherRequestRepository::new(pool.clone()));

    let auth_service = Arc::new(AuthService::new(user_repo.clone(), config.auth.clone()));
    let news_service = Arc::new(NewsService::new(news_repo));
    let publisher_service = Arc::new(PublisherService::new(request_repo, user_repo));

    let state = AppState {
        auth_service,
        news_service,
        publisher_service,
    };

    let app = api::build_router(state, &config.server.cors_origin);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
