//! Publisher API endpoints
//!
//! Handles HTTP requests for the publisher application workflow:
//! - GET /api/publisher/status/{user_id} - Check application status
//! - POST /api/publisher/request - Submit an application
//! - GET /api/publisher/requests - List pending applications
//! - PUT /api/publisher/approve/{id} - Approve an application
//! - PUT /api/publisher/reject/{id} - Reject an application

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

use crate::api::middleware::{ApiError, AppState};
use crate::models::{PublisherRequest, SubmitRequestInput};
use crate::services::publisher::PublisherServiceError;

/// Response carrying the applicant's latest status label
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the publisher router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status/{user_id}", get(get_status))
        .route("/request", post(submit_request))
        .route("/requests", get(list_requests))
        .route("/approve/{id}", put(approve_request))
        .route("/reject/{id}", put(reject_request))
}

/// GET /api/publisher/status/{user_id} - Latest application status
async fn get_status(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state
        .publisher_service
        .status(user_id)
        .await
        .map_err(map_publisher_error)?;

    Ok(Json(StatusResponse { status }))
}

/// POST /api/publisher/request - Submit an application
async fn submit_request(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequestInput>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .publisher_service
        .submit(body)
        .await
        .map_err(map_publisher_error)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Application submitted successfully.".to_string(),
        }),
    ))
}

/// GET /api/publisher/requests - List pending applications, newest first
async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublisherRequest>>, ApiError> {
    let requests = state
        .publisher_service
        .list_pending()
        .await
        .map_err(map_publisher_error)?;

    Ok(Json(requests))
}

/// PUT /api/publisher/approve/{id} - Approve an application
async fn approve_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .publisher_service
        .approve(id)
        .await
        .map_err(map_publisher_error)?;

    Ok(Json(MessageResponse {
        message: "Publisher approved.".to_string(),
    }))
}

/// PUT /api/publisher/reject/{id} - Reject an application
async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .publisher_service
        .reject(id)
        .await
        .map_err(map_publisher_error)?;

    Ok(Json(MessageResponse {
        message: "Publisher request rejected.".to_string(),
    }))
}

fn map_publisher_error(e: PublisherServiceError) -> ApiError {
    match e {
        PublisherServiceError::AlreadyPending => ApiError::validation_error(e.to_string()),
        PublisherServiceError::NotFound => ApiError::not_found("Request not found"),
        PublisherServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}
