//! News service
//!
//! Business logic for the news feed: listing (newest first), creation
//! with required-field checks, partial updates, and deletion. There is
//! no ownership model; any API caller may mutate articles.

use crate::db::repositories::NewsRepository;
use crate::models::{CreateNewsInput, News, UpdateNewsInput};
use anyhow::Context;
use std::sync::Arc;

/// Error types for news operations
#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    /// A required field is missing or blank
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No article with the given id
    #[error("News not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// News service
pub struct NewsService {
    news_repo: Arc<dyn NewsRepository>,
}

impl NewsService {
    /// Create a new news service
    pub fn new(news_repo: Arc<dyn NewsRepository>) -> Self {
        Self { news_repo }
    }

    /// List all articles, newest first
    pub async fn list(&self) -> Result<Vec<News>, NewsServiceError> {
        let news = self.news_repo.list().await.context("Failed to list news")?;
        Ok(news)
    }

    /// Create an article
    ///
    /// Title, description, and image URL are required; category and
    /// source fall back to their defaults.
    pub async fn create(&self, input: CreateNewsInput) -> Result<News, NewsServiceError> {
        for (field, value) in [
            ("title", &input.title),
            ("description", &input.description),
            ("image_url", &input.image_url),
        ] {
            if value.trim().is_empty() {
                return Err(NewsServiceError::ValidationError(format!(
                    "Field '{}' is required",
                    field
                )));
            }
        }

        let created = self
            .news_repo
            .create(&News::from_input(input))
            .await
            .context("Failed to create news")?;

        tracing::info!(news_id = created.id, "Created news article");

        Ok(created)
    }

    /// Partially update an article
    pub async fn update(
        &self,
        id: i64,
        input: UpdateNewsInput,
    ) -> Result<News, NewsServiceError> {
        self.news_repo
            .update(id, &input)
            .await
            .context("Failed to update news")?
            .ok_or(NewsServiceError::NotFound)
    }

    /// Delete an article
    pub async fn delete(&self, id: i64) -> Result<(), NewsServiceError> {
        let removed = self
            .news_repo
            .delete(id)
            .await
            .context("Failed to delete news")?;

        if !removed {
            return Err(NewsServiceError::NotFound);
        }

        tracing::info!(news_id = id, "Deleted news article");

        Ok(())
    }
}
