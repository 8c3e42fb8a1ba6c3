//! Publisher request repository
//!
//! Database operations for publisher applications. Status reads always
//! look at the user's most recent request; the pending list is what the
//! admin review screen consumes.

use crate::models::{PublisherRequest, RequestStatus};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

/// Publisher request repository trait
#[async_trait]
pub trait PublisherRequestRepository: Send + Sync {
    /// Create a new request
    async fn create(&self, request: &PublisherRequest) -> Result<PublisherRequest>;

    /// Get request by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<PublisherRequest>>;

    /// Get a user's most recent request, if any
    async fn latest_for_user(&self, user_id: i64) -> Result<Option<PublisherRequest>>;

    /// Check whether a user has a pending request
    async fn has_pending(&self, user_id: i64) -> Result<bool>;

    /// List all pending requests, newest first
    async fn list_pending(&self) -> Result<Vec<PublisherRequest>>;

    /// Set the status of a request
    async fn set_status(&self, id: i64, status: RequestStatus) -> Result<()>;
}

/// SQLx-based publisher request repository implementation
pub struct SqlxPublisherRequestRepository {
    pool: SqlitePool,
}

impl SqlxPublisherRequestRepository {
    /// Create a new SQLx publisher request repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: SqlitePool) -> Arc<dyn PublisherRequestRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl PublisherRequestRepository for SqlxPublisherRequestRepository {
    async fn create(&self, request: &PublisherRequest) -> Result<PublisherRequest> {
        let status_str = request.status.to_string();

        let result = sqlx::query(
            r#"
            INSERT INTO publisher_requests
                (user_id, full_name, email, phone_number, national_id, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.user_id)
        .bind(&request.full_name)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(&request.national_id)
        .bind(&status_str)
        .bind(request.created_at)
        .execute(&self.pool)
        .await
        .context("Failed to create publisher request")?;

        let id = result.last_insert_rowid();

        Ok(PublisherRequest {
            id,
            ..request.clone()
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<PublisherRequest>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, full_name, email, phone_number, national_id, status, created_at
            FROM publisher_requests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get publisher request by ID")?;

        match row {
            Some(row) => Ok(Some(row_to_request(&row)?)),
            None => Ok(None),
        }
    }

    async fn latest_for_user(&self, user_id: i64) -> Result<Option<PublisherRequest>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, full_name, email, phone_number, national_id, status, created_at
            FROM publisher_requests
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get latest publisher request")?;

        match row {
            Some(row) => Ok(Some(row_to_request(&row)?)),
            None => Ok(None),
        }
    }

    async fn has_pending(&self, user_id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM publisher_requests WHERE user_id = ? AND status = 'pending'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check for pending request")?;

        Ok(count > 0)
    }

    async fn list_pending(&self) -> Result<Vec<PublisherRequest>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, full_name, email, phone_number, national_id, status, created_at
            FROM publisher_requests
            WHERE status = 'pending'
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending requests")?;

        let mut requests = Vec::new();
        for row in rows {
            requests.push(row_to_request(&row)?);
        }

        Ok(requests)
    }

    async fn set_status(&self, id: i64, status: RequestStatus) -> Result<()> {
        sqlx::query("UPDATE publisher_requests SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update request status")?;

        Ok(())
    }
}

fn row_to_request(row: &sqlx::sqlite::SqliteRow) -> Result<PublisherRequest> {
    let status_str: String = row.get("status");
    let status = RequestStatus::from_str(&status_str)
        .map_err(|e| anyhow::anyhow!("Invalid status in database: {}", e))?;

    Ok(PublisherRequest {
        id: row.get("id"),
        user_id: row.get("user_id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        phone_number: row.get("phone_number"),
        national_id: row.get("national_id"),
        status,
        created_at: row.get("created_at"),
    })
}
