//! Database layer
//!
//! SQLite access for the SwipeNews backend, built on sqlx. The pool is
//! created from configuration and schema changes are applied through the
//! code-embedded migrations in [`migrations`].

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
