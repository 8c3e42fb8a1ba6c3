//! News API endpoints
//!
//! Handles HTTP requests for articles:
//! - GET /api/news - List all articles, newest first
//! - POST /api/news - Create an article
//! - PUT /api/news/{id} - Update an article
//! - DELETE /api/news/{id} - Delete an article

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateNewsInput, News, UpdateNewsInput};
use crate::services::news::NewsServiceError;

/// Response for a deleted article
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Build the news router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route("/{id}", axum::routing::put(update_news).delete(delete_news))
}

/// GET /api/news - List all articles
async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<News>>, ApiError> {
    let news = state.news_service.list().await.map_err(map_news_error)?;
    Ok(Json(news))
}

/// POST /api/news - Create an article
async fn create_news(
    State(state): State<AppState>,
    Json(body): Json<CreateNewsInput>,
) -> Result<impl IntoResponse, ApiError> {
    let news = state
        .news_service
        .create(body)
        .await
        .map_err(map_news_error)?;

    Ok((StatusCode::CREATED, Json(news)))
}

/// PUT /api/news/{id} - Update an article
async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateNewsInput>,
) -> Result<Json<News>, ApiError> {
    let news = state
        .news_service
        .update(id, body)
        .await
        .map_err(map_news_error)?;

    Ok(Json(news))
}

/// DELETE /api/news/{id} - Delete an article
async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state
        .news_service
        .delete(id)
        .await
        .map_err(map_news_error)?;

    Ok(Json(DeleteResponse {
        message: "News deleted".to_string(),
    }))
}

fn map_news_error(e: NewsServiceError) -> ApiError {
    match e {
        NewsServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        NewsServiceError::NotFound => ApiError::not_found("News not found."),
        NewsServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}
