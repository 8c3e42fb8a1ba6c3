//! Services layer - Business logic
//!
//! This module contains all business logic services for the SwipeNews backend.
//! Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories
//! - Handling validation and error cases

pub mod auth;
pub mod news;
pub mod password;
pub mod publisher;
pub mod token;

pub use auth::{AuthService, AuthServiceError, LoginInput, LoginOutcome, RegisterInput};
pub use news::{NewsService, NewsServiceError};
pub use password::{hash_password, verify_password};
pub use publisher::{PublisherService, PublisherServiceError};
pub use token::{Claims, TokenError, TokenService};
