//! Store gateway trait for link records.

use crate::domain::entities::{Link, NewLink};
use crate::error::StoreError;
use async_trait::async_trait;

/// Gateway to the mapping table.
///
/// The gateway is the serialization point for all writes. Implementations must
/// guarantee that two concurrent [`create`](Self::create) calls with the same
/// long URL or token cannot both succeed, and that concurrent
/// [`increment_usage`](Self::increment_usage) calls are never lost.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link with `usage_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] naming the conflicting column if
    /// the long URL or the token is already stored.
    async fn create(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Finds a link by its token.
    async fn find_by_token(&self, token: &str) -> Result<Option<Link>, StoreError>;

    /// Finds a link by its normalized long URL.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<Link>, StoreError>;

    /// Atomically increments `usage_count` and refreshes `updated_at`.
    ///
    /// Returns the updated link, or `Ok(None)` if no link has this token.
    /// Never creates a record.
    async fn increment_usage(&self, token: &str) -> Result<Option<Link>, StoreError>;

    /// Lists every link ordered by `updated_at` ascending, ties broken by `id`.
    async fn list_all(&self) -> Result<Vec<Link>, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
