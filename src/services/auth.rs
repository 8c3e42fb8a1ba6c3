//! Authentication service
//!
//! Implements business logic for accounts and sign-in:
//! - Registration with store-level email/username uniqueness
//! - Login, checking the configured admin pair before the user store
//! - Resolving token claims back to a user record
//!
//! The admin identity is a configured credential pair with no user row;
//! it is represented by [`User::ADMIN_ID`] and a synthetic user body.

use crate::config::AuthConfig;
use crate::db::repositories::UserRepository;
use crate::models::User;
use crate::services::password::{hash_password, verify_password};
use crate::services::token::{Claims, TokenService};
use anyhow::Context;
use serde::Deserialize;
use std::sync::Arc;

/// Minimum username length, matching the store schema
const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length, matching the store schema
const MIN_PASSWORD_LEN: usize = 6;

/// Error types for authentication operations
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Invalid input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Email already registered
    #[error("User already exists with this email.")]
    UserExists,

    /// Unknown email or wrong password; deliberately undifferentiated
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Token subject no longer resolves to a stored user
    #[error("User not found")]
    UserNotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Registration input
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Result of a successful login
#[derive(Debug)]
pub struct LoginOutcome {
    /// Signed session token
    pub token: String,
    /// The logged-in user (synthetic for the admin pair)
    pub user: User,
    /// Whether the admin pair was used
    pub is_admin: bool,
}

/// Authentication service
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenService,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(user_repo: Arc<dyn UserRepository>, config: AuthConfig) -> Self {
        let tokens = TokenService::new(&config.token_secret, config.token_ttl_days);
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    /// Register a new user
    ///
    /// Trims the username, trims and lowercases the email, and enforces
    /// the schema minimum lengths. Fails if the email is already
    /// registered; username collisions surface as store-level errors.
    pub async fn register(&self, input: RegisterInput) -> Result<User, AuthServiceError> {
        let username = input.username.trim().to_string();
        let email = input.email.trim().to_lowercase();

        if username.len() < MIN_USERNAME_LEN {
            return Err(AuthServiceError::ValidationError(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if !email.contains('@') {
            return Err(AuthServiceError::ValidationError(
                "Invalid email address".to_string(),
            ));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthServiceError::ValidationError(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self
            .user_repo
            .get_by_email(&email)
            .await
            .context("Failed to check email")?
            .is_some()
        {
            return Err(AuthServiceError::UserExists);
        }

        let password_hash = hash_password(&input.password).context("Failed to hash password")?;

        let user = User::new(username, email, password_hash);
        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        tracing::info!(user_id = created.id, "Registered user");

        Ok(created)
    }

    /// Login with credentials
    ///
    /// The configured admin pair is checked first and always wins,
    /// regardless of store state. For everyone else, an unknown email
    /// and a wrong password produce the identical error.
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, AuthServiceError> {
        if input.email == self.config.admin_email && input.password == self.config.admin_password {
            let token = self
                .tokens
                .issue(User::ADMIN_ID, true)
                .context("Failed to issue token")?;

            tracing::info!("Admin login");

            return Ok(LoginOutcome {
                token,
                user: self.admin_user(),
                is_admin: true,
            });
        }

        let user = self
            .user_repo
            .get_by_email(&input.email.trim().to_lowercase())
            .await
            .context("Failed to look up user")?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id, false)
            .context("Failed to issue token")?;

        tracing::info!(user_id = user.id, "User login");

        Ok(LoginOutcome {
            token,
            user,
            is_admin: false,
        })
    }

    /// Resolve verified token claims back to a user record
    ///
    /// The reserved admin id resolves to the synthetic admin body; any
    /// other id must still exist in the store.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AuthServiceError> {
        let user_id = claims
            .user_id()
            .map_err(|_| AuthServiceError::UserNotFound)?;

        if user_id == User::ADMIN_ID {
            return Ok(self.admin_user());
        }

        self.user_repo
            .get_by_id(user_id)
            .await
            .context("Failed to look up user")?
            .ok_or(AuthServiceError::UserNotFound)
    }

    /// Access the token service for request verification
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Synthetic user body for the configured admin pair
    fn admin_user(&self) -> User {
        let mut user = User::new(
            "Admin".to_string(),
            self.config.admin_email.clone(),
            String::new(),
        );
        user.id = User::ADMIN_ID;
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxUserRepository;
    use crate::db::{create_test_pool, migrations};

    async fn setup() -> AuthService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        AuthService::new(SqlxUserRepository::boxed(pool), AuthConfig::default())
    }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            username: "reader".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user() {
        let auth = setup().await;

        let user = auth
            .register(register_input("Reader@Example.com"))
            .await
            .expect("Registration failed");

        assert!(user.id > 0);
        // Email stored lowercase
        assert_eq!(user.email, "reader@example.com");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fails() {
        let auth = setup().await;

        auth.register(register_input("reader@example.com"))
            .await
            .expect("First registration failed");

        let mut second = register_input("reader@example.com");
        second.username = "other".to_string();
        let result = auth.register(second).await;

        assert!(matches!(result, Err(AuthServiceError::UserExists)));
    }

    #[tokio::test]
    async fn test_register_short_password_fails() {
        let auth = setup().await;

        let mut input = register_input("reader@example.com");
        input.password = "short".to_string();
        let result = auth.register(input).await;

        assert!(matches!(result, Err(AuthServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_register_short_username_fails() {
        let auth = setup().await;

        let mut input = register_input("reader@example.com");
        input.username = "ab".to_string();
        let result = auth.register(input).await;

        assert!(matches!(result, Err(AuthServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let auth = setup().await;
        auth.register(register_input("reader@example.com"))
            .await
            .expect("Registration failed");

        let outcome = auth
            .login(LoginInput {
                email: "reader@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .expect("Login failed");

        assert!(!outcome.is_admin);
        assert_eq!(outcome.user.email, "reader@example.com");

        let claims = auth
            .tokens()
            .verify(&outcome.token)
            .expect("Token invalid");
        assert_eq!(claims.user_id().unwrap(), outcome.user.id);
        assert!(!claims.is_admin);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_identical() {
        let auth = setup().await;
        auth.register(register_input("reader@example.com"))
            .await
            .expect("Registration failed");

        let unknown = auth
            .login(LoginInput {
                email: "nobody@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap_err();
        let wrong = auth
            .login(LoginInput {
                email: "reader@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
        assert_eq!(unknown.to_string(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn test_admin_login_with_empty_store() {
        let auth = setup().await;

        let outcome = auth
            .login(LoginInput {
                email: "admin@swipenews.local".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .expect("Admin login failed");

        assert!(outcome.is_admin);
        assert_eq!(outcome.user.id, User::ADMIN_ID);
        assert_eq!(outcome.user.username, "Admin");

        let claims = auth
            .tokens()
            .verify(&outcome.token)
            .expect("Token invalid");
        assert!(claims.is_admin);
    }

    #[tokio::test]
    async fn test_current_user_resolves_claims() {
        let auth = setup().await;
        let user = auth
            .register(register_input("reader@example.com"))
            .await
            .expect("Registration failed");

        let outcome = auth
            .login(LoginInput {
                email: "reader@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .expect("Login failed");
        let claims = auth
            .tokens()
            .verify(&outcome.token)
            .expect("Token invalid");

        let current = auth.current_user(&claims).await.expect("Lookup failed");
        assert_eq!(current.id, user.id);
    }

    #[tokio::test]
    async fn test_current_user_admin_special_case() {
        let auth = setup().await;

        let outcome = auth
            .login(LoginInput {
                email: "admin@swipenews.local".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .expect("Admin login failed");
        let claims = auth
            .tokens()
            .verify(&outcome.token)
            .expect("Token invalid");

        let current = auth.current_user(&claims).await.expect("Lookup failed");
        assert_eq!(current.id, User::ADMIN_ID);
        assert_eq!(current.email, "admin@swipenews.local");
    }

    #[tokio::test]
    async fn test_current_user_missing_record() {
        let auth = setup().await;

        let claims = Claims {
            sub: "9999".to_string(),
            is_admin: false,
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };

        let result = auth.current_user(&claims).await;
        assert!(matches!(result, Err(AuthServiceError::UserNotFound)));
    }
}
