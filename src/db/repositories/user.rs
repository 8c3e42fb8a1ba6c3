//! User repository
//!
//! Database operations for users. Bookmarks live in a separate
//! `user_bookmarks` join table and are loaded alongside the user row,
//! ordered by the position they were saved in.

use crate::models::User;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: &User) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Set the publisher flag for a user
    async fn set_publisher(&self, id: i64, is_publisher: bool) -> Result<()>;
}

/// SQLx-based user repository implementation
pub struct SqlxUserRepository {
    pool: SqlitePool,
}

impl SqlxUserRepository {
    /// Create a new SQLx user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, is_publisher, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_publisher)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create user")?;

        let id = result.last_insert_rowid();

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            bookmarks: Vec::new(),
            is_publisher: user.is_publisher,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, is_publisher, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user by ID")?;

        match row {
            Some(row) => Ok(Some(self.row_to_user(&row).await?)),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, is_publisher, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get user by email")?;

        match row {
            Some(row) => Ok(Some(self.row_to_user(&row).await?)),
            None => Ok(None),
        }
    }

    async fn set_publisher(&self, id: i64, is_publisher: bool) -> Result<()> {
        sqlx::query("UPDATE users SET is_publisher = ?, updated_at = ? WHERE id = ?")
            .bind(is_publisher)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update publisher flag")?;

        Ok(())
    }
}

impl SqlxUserRepository {
    async fn row_to_user(&self, row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: i64 = row.get("id");
        let bookmarks = load_bookmarks(&self.pool, id).await?;

        Ok(User {
            id,
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            bookmarks,
            is_publisher: row.get("is_publisher"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

/// Load a user's bookmarked news ids in saved order
async fn load_bookmarks(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>> {
    let rows = sqlx::query(
        "SELECT news_id FROM user_bookmarks WHERE user_id = ? ORDER BY position",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("Failed to load bookmarks")?;

    Ok(rows.iter().map(|row| row.get("news_id")).collect())
}
