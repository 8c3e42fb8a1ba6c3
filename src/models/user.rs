//! User model
//!
//! Defines the User entity for the SwipeNews backend.
//!
//! A user is a reader account. Readers can bookmark articles and may apply
//! to become a publisher; the `is_publisher` flag is flipped when an admin
//! approves the application. The admin identity itself is a configured
//! credential pair with no user record (see [`User::ADMIN_ID`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// Email address (unique, stored lowercase)
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Bookmarked news ids, in the order they were saved
    pub bookmarks: Vec<i64>,
    /// Whether this user may publish news
    pub is_publisher: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Reserved id carried in tokens issued to the configured admin pair.
    /// No user row exists for it; lookups must special-case it.
    pub const ADMIN_ID: i64 = 0;

    /// Create a new User with the given parameters.
    ///
    /// The password must already be hashed; use
    /// `services::password::hash_password()`.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            username,
            email,
            password_hash,
            bookmarks: Vec::new(),
            is_publisher: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "reader".to_string(),
            "reader@example.com".to_string(),
            "$argon2id$hash".to_string(),
        );

        assert_eq!(user.id, 0);
        assert!(!user.is_publisher);
        assert!(user.bookmarks.is_empty());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "reader".to_string(),
            "reader@example.com".to_string(),
            "top-secret-hash".to_string(),
        );

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("top-secret-hash"));
        assert!(json.contains("reader@example.com"));
    }
}
