//! News article model
//!
//! Flat article records for the swipe feed. Articles carry no ownership
//! link back to the publisher who created them and are never versioned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default category applied when the creator provides none
pub const DEFAULT_CATEGORY: &str = "General";

/// Default source label applied when the creator provides none
pub const DEFAULT_SOURCE: &str = "SwipeNews";

/// A single news article in the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    /// Unique identifier
    pub id: i64,
    /// Headline shown on the card
    pub title: String,
    /// Short-form body shown on the card
    pub description: String,
    /// Optional full article text
    pub content: Option<String>,
    /// Image shown behind the card
    pub image_url: String,
    /// Category label
    pub category: String,
    /// Source label
    pub source: String,
    /// Creation timestamp (feed is ordered newest first on this)
    pub created_at: DateTime<Utc>,
}

/// Input for creating a news article
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNewsInput {
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub image_url: String,
    pub category: Option<String>,
    pub source: Option<String>,
}

/// Input for partially updating a news article
///
/// Each provided field fully replaces the stored value; absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNewsInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
}

impl News {
    /// Build an unsaved article from creation input, applying the
    /// category/source defaults.
    pub fn from_input(input: CreateNewsInput) -> Self {
        Self {
            id: 0, // Will be set by the database
            title: input.title,
            description: input.description,
            content: input.content,
            image_url: input.image_url,
            category: input
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            source: input
                .source
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            created_at: Utc::now(),
        }
    }
}
