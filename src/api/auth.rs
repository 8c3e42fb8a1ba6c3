//! Authentication API endpoints
//!
//! Handles HTTP requests for user accounts:
//! - POST /api/auth/signup - User registration
//! - POST /api/auth/login - User login
//! - GET /api/auth/me - Get current user

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState, AuthenticatedClaims};
use crate::models::User;
use crate::services::auth::{AuthServiceError, LoginInput, RegisterInput};

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response for successful registration
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// User info returned by login and /me
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bookmarks: Vec<i64>,
    pub is_publisher: bool,
    pub is_admin: bool,
}

impl UserResponse {
    fn from_user(user: User, is_admin: bool) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            bookmarks: user.bookmarks,
            is_publisher: user.is_publisher,
            is_admin,
        }
    }
}

/// Build the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

/// Build the protected auth routes (requires auth middleware)
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(get_current_user))
}

/// POST /api/auth/signup - User registration
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RegisterInput {
        username: body.username,
        email: body.email,
        password: body.password,
    };

    let user = state
        .auth_service
        .register(input)
        .await
        .map_err(map_auth_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: user.id,
            username: user.username,
            email: user.email,
        }),
    ))
}

/// POST /api/auth/login - User login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let input = LoginInput {
        email: body.email,
        password: body.password,
    };

    let outcome = state
        .auth_service
        .login(input)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: UserResponse::from_user(outcome.user, outcome.is_admin),
    }))
}

/// GET /api/auth/me - Get current user
async fn get_current_user(
    State(state): State<AppState>,
    AuthenticatedClaims(claims): AuthenticatedClaims,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .auth_service
        .current_user(&claims)
        .await
        .map_err(map_auth_error)?;

    Ok(Json(UserResponse::from_user(user, claims.is_admin)))
}

fn map_auth_error(e: AuthServiceError) -> ApiError {
    match e {
        AuthServiceError::ValidationError(msg) => ApiError::validation_error(msg),
        AuthServiceError::UserExists | AuthServiceError::InvalidCredentials => {
            ApiError::validation_error(e.to_string())
        }
        AuthServiceError::UserNotFound => ApiError::not_found(e.to_string()),
        AuthServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
    }
}
