//! Publisher workflow service
//!
//! Business logic for publisher applications: submission gated to one
//! pending request per user, status reads from the most recent request,
//! and the admin approve/reject decisions.
//!
//! Approval touches two records (request status, then the user's
//! publisher flag) without a transaction; if the user row is gone by the
//! time the flag is written, the status change stands and the flag write
//! is skipped.

use crate::db::repositories::{PublisherRequestRepository, UserRepository};
use crate::models::{PublisherRequest, RequestStatus, SubmitRequestInput};
use anyhow::Context;
use std::sync::Arc;

/// Error types for publisher workflow operations
#[derive(Debug, thiserror::Error)]
pub enum PublisherServiceError {
    /// A pending request already exists for this user
    #[error("Request already pending.")]
    AlreadyPending,

    /// No request with the given id
    #[error("Request not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Status report for a user: the latest request's status, or "none"
/// if the user never applied. Reported as a bare string to match the
/// feed client's expectations.
pub fn status_label(latest: Option<&PublisherRequest>) -> String {
    match latest {
        Some(request) => request.status.to_string(),
        None => "none".to_string(),
    }
}

/// Publisher workflow service
pub struct PublisherService {
    request_repo: Arc<dyn PublisherRequestRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl PublisherService {
    /// Create a new publisher service
    pub fn new(
        request_repo: Arc<dyn PublisherRequestRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            request_repo,
            user_repo,
        }
    }

    /// Status of a user's most recent request ("none" if never applied)
    pub async fn status(&self, user_id: i64) -> Result<String, PublisherServiceError> {
        let latest = self
            .request_repo
            .latest_for_user(user_id)
            .await
            .context("Failed to get latest request")?;

        Ok(status_label(latest.as_ref()))
    }

    /// Submit a publisher application
    ///
    /// Rejected while the user already has a pending request; a request
    /// that was already decided doesn't block a fresh application.
    pub async fn submit(
        &self,
        input: SubmitRequestInput,
    ) -> Result<PublisherRequest, PublisherServiceError> {
        if self
            .request_repo
            .has_pending(input.user_id)
            .await
            .context("Failed to check for pending request")?
        {
            return Err(PublisherServiceError::AlreadyPending);
        }

        let created = self
            .request_repo
            .create(&PublisherRequest::from_input(input))
            .await
            .context("Failed to create request")?;

        tracing::info!(
            request_id = created.id,
            user_id = created.user_id,
            "Publisher request submitted"
        );

        Ok(created)
    }

    /// All pending requests, newest first
    pub async fn list_pending(&self) -> Result<Vec<PublisherRequest>, PublisherServiceError> {
        let pending = self
            .request_repo
            .list_pending()
            .await
            .context("Failed to list pending requests")?;
        Ok(pending)
    }

    /// Approve a request and grant the user publishing rights
    ///
    /// The status flip and the user flag are separate writes; a missing
    /// user record only skips the flag.
    pub async fn approve(&self, request_id: i64) -> Result<(), PublisherServiceError> {
        let request = self
            .request_repo
            .get_by_id(request_id)
            .await
            .context("Failed to get request")?
            .ok_or(PublisherServiceError::NotFound)?;

        self.request_repo
            .set_status(request.id, RequestStatus::Approved)
            .await
            .context("Failed to approve request")?;

        match self
            .user_repo
            .get_by_id(request.user_id)
            .await
            .context("Failed to look up user")?
        {
            Some(user) => {
                self.user_repo
                    .set_publisher(user.id, true)
                    .await
                    .context("Failed to set publisher flag")?;
            }
            None => {
                tracing::warn!(
                    request_id,
                    user_id = request.user_id,
                    "Approved request for a user that no longer exists"
                );
            }
        }

        tracing::info!(request_id, "Publisher request approved");

        Ok(())
    }

    /// Reject a request; no user mutation
    pub async fn reject(&self, request_id: i64) -> Result<(), PublisherServiceError> {
        let request = self
            .request_repo
            .get_by_id(request_id)
            .await
            .context("Failed to get request")?
            .ok_or(PublisherServiceError::NotFound)?;

        self.request_repo
            .set_status(request.id, RequestStatus::Rejected)
            .await
            .context("Failed to reject request")?;

        tracing::info!(request_id, "Publisher request rejected");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{
        SqlxPublisherRequestRepository, SqlxUserRepository, UserRepository,
    };
    use crate::db::{create_test_pool, migrations};
    use crate::models::User;

    struct Fixture {
        service: PublisherService,
        users: Arc<dyn UserRepository>,
        user_id: i64,
        pool: sqlx::SqlitePool,
    }

    async fn setup() -> Fixture {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let users = SqlxUserRepository::boxed(pool.clone());
        let user = users
            .create(&User::new(
                "applicant".to_string(),
                "applicant@example.com".to_string(),
                "hash".to_string(),
            ))
            .await
            .expect("Failed to create user");

        let service = PublisherService::new(
            SqlxPublisherRequestRepository::boxed(pool.clone()),
            users.clone(),
        );

        Fixture {
            service,
            users,
            user_id: user.id,
            pool,
        }
    }

    fn submit_input(user_id: i64) -> SubmitRequestInput {
        SubmitRequestInput {
            user_id,
            full_name: "App Li Cant".to_string(),
            email: "applicant@example.com".to_string(),
            phone_number: "5550001111".to_string(),
            national_id: "123412341234".to_string(),
        }
    }

    #[tokio::test]
    async fn test_status_none_before_any_request() {
        let fx = setup().await;

        let status = fx.service.status(fx.user_id).await.expect("Status failed");
        assert_eq!(status, "none");
    }

    #[tokio::test]
    async fn test_full_approval_flow() {
        let fx = setup().await;

        let request = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");
        assert_eq!(
            fx.service.status(fx.user_id).await.expect("Status failed"),
            "pending"
        );

        fx.service.approve(request.id).await.expect("Approve failed");

        assert_eq!(
            fx.service.status(fx.user_id).await.expect("Status failed"),
            "approved"
        );
        let user = fx
            .users
            .get_by_id(fx.user_id)
            .await
            .expect("Lookup failed")
            .expect("User not found");
        assert!(user.is_publisher);
    }

    #[tokio::test]
    async fn test_rejection_leaves_flag_unset() {
        let fx = setup().await;

        let request = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");
        fx.service.reject(request.id).await.expect("Reject failed");

        assert_eq!(
            fx.service.status(fx.user_id).await.expect("Status failed"),
            "rejected"
        );
        let user = fx
            .users
            .get_by_id(fx.user_id)
            .await
            .expect("Lookup failed")
            .expect("User not found");
        assert!(!user.is_publisher);
    }

    #[tokio::test]
    async fn test_second_submission_while_pending_rejected() {
        let fx = setup().await;

        fx.service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");
        let result = fx.service.submit(submit_input(fx.user_id)).await;

        assert!(matches!(result, Err(PublisherServiceError::AlreadyPending)));
    }

    #[tokio::test]
    async fn test_resubmission_after_decision_allowed() {
        let fx = setup().await;

        let first = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");
        fx.service.reject(first.id).await.expect("Reject failed");

        let second = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Resubmission failed");
        assert_ne!(second.id, first.id);
        assert_eq!(
            fx.service.status(fx.user_id).await.expect("Status failed"),
            "pending"
        );
    }

    #[tokio::test]
    async fn test_approve_with_vanished_user_still_updates_request() {
        let fx = setup().await;

        let request = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");

        // The store has no referential tie between requests and users
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(fx.user_id)
            .execute(&fx.pool)
            .await
            .expect("Delete failed");

        fx.service.approve(request.id).await.expect("Approve failed");

        assert_eq!(
            fx.service.status(fx.user_id).await.expect("Status failed"),
            "approved"
        );
    }

    #[tokio::test]
    async fn test_approve_unknown_request() {
        let fx = setup().await;

        let result = fx.service.approve(999).await;
        assert!(matches!(result, Err(PublisherServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_pending_excludes_decided() {
        let fx = setup().await;

        let first = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");
        fx.service.reject(first.id).await.expect("Reject failed");
        let second = fx
            .service
            .submit(submit_input(fx.user_id))
            .await
            .expect("Submit failed");

        let pending = fx.service.list_pending().await.expect("List failed");
        let ids: Vec<i64> = pending.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id]);
    }
}
