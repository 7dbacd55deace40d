//! Link entity representing a long URL to token mapping.

use chrono::{DateTime, Utc};

/// A persisted mapping between a long URL and its short token.
///
/// `long_url` and `token` are each unique across the table and never change
/// once the record exists. Only `usage_count` and `updated_at` are mutated,
/// by the atomic usage increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub token: String,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        long_url: String,
        token: String,
        usage_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            token,
            usage_count,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the link has never been resolved.
    pub fn is_unused(&self) -> bool {
        self.usage_count == 0
    }
}

/// Input data for creating a new link.
///
/// `long_url` must already be normalized by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub token: String,
}
