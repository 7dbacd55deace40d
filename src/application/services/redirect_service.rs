//! Token resolution and listing service.

use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, NotFoundError, StoreError};

/// Service for resolving short tokens and reading the mapping table.
pub struct RedirectService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves `token` to its link and records one use.
    ///
    /// The lookup and the usage increment are a single store operation, so
    /// concurrent resolves of the same token are all counted.
    ///
    /// # Errors
    ///
    /// - [`NotFoundError::TokenNotProvided`] if `token` is absent or blank
    /// - [`NotFoundError::UnknownToken`] if no link uses `token`
    /// - [`AppError::Store`] on store failures
    pub async fn resolve(&self, token: Option<&str>) -> Result<Link, AppError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(NotFoundError::TokenNotProvided)?;

        match self.repository.increment_usage(token).await? {
            Some(link) => {
                debug!(token, usage_count = link.usage_count, "Token resolved");
                metrics::counter!("links_resolved_total").increment(1);
                Ok(link)
            }
            None => {
                debug!(token, "Unknown token");
                metrics::counter!("links_resolve_misses_total").increment(1);
                Err(NotFoundError::UnknownToken {
                    token: token.to_string(),
                }
                .into())
            }
        }
    }

    /// Returns every link, least recently updated first.
    pub async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.repository.list_all().await?)
    }

    /// Checks that the store answers queries.
    pub async fn check_store(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }
}
