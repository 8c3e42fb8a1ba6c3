//! News repository
//!
//! Database operations for news articles. The feed reads newest first;
//! updates replace only the fields the caller provided.

use crate::models::{News, UpdateNewsInput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// News repository trait
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Create a new article
    async fn create(&self, news: &News) -> Result<News>;

    /// Get article by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<News>>;

    /// List all articles, newest first
    async fn list(&self) -> Result<Vec<News>>;

    /// Partially update an article; returns the updated record, or
    /// `None` if no article with that id exists
    async fn update(&self, id: i64, input: &UpdateNewsInput) -> Result<Option<News>>;

    /// Delete an article by ID; returns whether a record was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// SQLx-based news repository implementation
pub struct SqlxNewsRepository {
    pool: SqlitePool,
}

impl SqlxNewsRepository {
    /// Create a new SQLx news repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn NewsRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl NewsRepository for SqlxNewsRepository {
    async fn create(&self, news: &News) -> Result<News> {
        let result = sqlx::query(
            r#"
            INSERT INTO news (title, description, content, image_url, category, source, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&news.title)
        .bind(&news.description)
        .bind(&news.content)
        .bind(&news.image_url)
        .bind(&news.category)
        .bind(&news.source)
        .bind(news.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to create news article")?;

        let id = result.last_insert_rowid();

        Ok(News {
            id,
            ..news.clone()
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<News>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, content, image_url, category, source, created_at
            FROM news
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get news by ID")?;

        Ok(row.map(|row| row_to_news(&row)))
    }

    async fn list(&self) -> Result<Vec<News>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, content, image_url, category, source, created_at
            FROM news
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list news")?;

        Ok(rows.iter().map(row_to_news).collect())
    }

    async fn update(&self, id: i64, input: &UpdateNewsInput) -> Result<Option<News>> {
        let existing = match self.get_by_id(id).await? {
            Some(news) => news,
            None => return Ok(None),
        };

        let title = input.title.clone().unwrap_or(existing.title);
        let description = input.description.clone().unwrap_or(existing.description);
        let content = input.content.clone().or(existing.content);
        let image_url = input.image_url.clone().unwrap_or(existing.image_url);
        let category = input.category.clone().unwrap_or(existing.category);
        let source = input.source.clone().unwrap_or(existing.source);

        sqlx::query(
            r#"
            UPDATE news
            SET title = ?, description = ?, content = ?, image_url = ?, category = ?, source = ?
            WHERE id = ?
            "#,
        )
        .bind(&title)
        .bind(&description)
        .bind(&content)
        .bind(&image_url)
        .bind(&category)
        .bind(&source)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update news article")?;

        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete news article")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_news(row: &sqlx::sqlite::SqliteRow) -> News {
    News {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        content: row.get("content"),
        image_url: row.get("image_url"),
        category: row.get("category"),
        source: row.get("source"),
        created_at: row.get("created_at"),
    }
}
