//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles CRUD operations for a specific entity.

pub mod news;
pub mod publisher_request;
pub mod user;

pub use news::{NewsRepository, SqlxNewsRepository};
pub use publisher_request::{PublisherRequestRepository, SqlxPublisherRequestRepository};
pub use user::{SqlxUserRepository, UserRepository};
