//! Short link creation service.

use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::entities::{Link, NewLink};
use crate::domain::notifier::{ChangeEvent, ChangeNotifier};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, ConflictError, StoreError, UniqueField};
use crate::utils::token_generator::{DEFAULT_TOKEN_LENGTH, generate_token, validate_custom_token};
use crate::utils::url_validator::validate_long_url;

/// Default number of generated candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Length and retry bound for generated tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub length: usize,
    pub max_attempts: usize,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Result of a successful shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// A new record was stored.
    Created(Link),
    /// The URL was already shortened; nothing was written.
    AlreadyExists(Link),
}

impl ShortenOutcome {
    /// Returns true if a new record was stored.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The stored link, new or existing.
    pub fn link(&self) -> &Link {
        match self {
            Self::Created(link) | Self::AlreadyExists(link) => link,
        }
    }

    /// Consumes the outcome and returns the stored link.
    pub fn into_link(self) -> Link {
        match self {
            Self::Created(link) | Self::AlreadyExists(link) => link,
        }
    }

    /// Returns the link only if it was newly created.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::AlreadyExists`] for an existing mapping.
    pub fn into_created(self) -> Result<Link, AppError> {
        match self {
            Self::Created(link) => Ok(link),
            Self::AlreadyExists(link) => {
                Err(ConflictError::AlreadyExists { token: link.token }.into())
            }
        }
    }
}

/// Outcome of a single insert attempt.
enum Insertion {
    Inserted(Link),
    LongUrlTaken(Link),
    TokenTaken,
}

/// Service for creating short links.
///
/// Guarantees at most one record per normalized long URL and per token,
/// relying on the store's unique constraints when concurrent requests race.
pub struct ShortenService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    notifier: ChangeNotifier,
    policy: TokenPolicy,
}

impl<R: LinkRepository + ?Sized> ShortenService<R> {
    /// Creates a new shortening service.
    pub fn new(repository: Arc<R>, notifier: ChangeNotifier, policy: TokenPolicy) -> Self {
        Self {
            repository,
            notifier,
            policy,
        }
    }

    /// Shortens `long_url`, optionally under a caller-chosen token.
    ///
    /// # Flow
    ///
    /// 1. Validate and normalize the URL
    /// 2. Return the existing mapping if the URL is already stored (no write);
    ///    the custom token is ignored in that case
    /// 3. Validate the custom token and use it verbatim, or generate candidates
    ///    until one is free
    /// 4. Persist and publish a change notification
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for bad input,
    /// [`ConflictError::TokenTaken`] if a custom token is in use,
    /// [`AppError::GenerationExhausted`] if no free token was found and
    /// [`AppError::Store`] on store failures.
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_token: Option<&str>,
    ) -> Result<ShortenOutcome, AppError> {
        let long_url = validate_long_url(long_url)?;

        if let Some(existing) = self.repository.find_by_long_url(&long_url).await? {
            debug!(token = %existing.token, "URL already shortened");
            metrics::counter!("links_existing_total").increment(1);
            return Ok(ShortenOutcome::AlreadyExists(existing));
        }

        let custom_token = custom_token
            .map(validate_custom_token)
            .transpose()?
            .flatten();

        let outcome = match custom_token {
            Some(token) => self.create_with_custom_token(&long_url, token).await?,
            None => self.create_with_generated_token(&long_url).await?,
        };

        match &outcome {
            ShortenOutcome::Created(link) => {
                info!(id = link.id, token = %link.token, "Short link created");
                metrics::counter!("links_created_total").increment(1);
                self.notifier.publish(ChangeEvent::Updated);
            }
            ShortenOutcome::AlreadyExists(link) => {
                debug!(token = %link.token, "Lost creation race, returning committed link");
                metrics::counter!("links_existing_total").increment(1);
            }
        }

        Ok(outcome)
    }

    /// Stores `long_url` under a user-supplied token. Never falls back to generation.
    async fn create_with_custom_token(
        &self,
        long_url: &str,
        token: String,
    ) -> Result<ShortenOutcome, AppError> {
        if self.repository.find_by_token(&token).await?.is_some() {
            return Err(ConflictError::TokenTaken { token }.into());
        }

        match self.insert(long_url, token.clone()).await? {
            Insertion::Inserted(link) => Ok(ShortenOutcome::Created(link)),
            Insertion::LongUrlTaken(link) => Ok(ShortenOutcome::AlreadyExists(link)),
            Insertion::TokenTaken => Err(ConflictError::TokenTaken { token }.into()),
        }
    }

    /// Stores `long_url` under a generated token, retrying on collision.
    async fn create_with_generated_token(
        &self,
        long_url: &str,
    ) -> Result<ShortenOutcome, AppError> {
        for attempt in 1..=self.policy.max_attempts {
            let candidate = generate_token(self.policy.length)
                .map_err(|e| AppError::Internal(format!("random source failed: {}", e)))?;

            if self.repository.find_by_token(&candidate).await?.is_some() {
                debug!(attempt, "Generated token already in use, retrying");
                metrics::counter!("token_collisions_total").increment(1);
                continue;
            }

            match self.insert(long_url, candidate).await? {
                Insertion::Inserted(link) => return Ok(ShortenOutcome::Created(link)),
                Insertion::LongUrlTaken(link) => return Ok(ShortenOutcome::AlreadyExists(link)),
                Insertion::TokenTaken => {
                    debug!(attempt, "Generated token taken concurrently, retrying");
                    metrics::counter!("token_collisions_total").increment(1);
                }
            }
        }

        error!(
            attempts = self.policy.max_attempts,
            length = self.policy.length,
            "Could not generate a unique token"
        );
        Err(AppError::GenerationExhausted {
            attempts: self.policy.max_attempts,
        })
    }

    /// Inserts a record, classifying unique violations from concurrent writers.
    async fn insert(&self, long_url: &str, token: String) -> Result<Insertion, AppError> {
        let new_link = NewLink {
            long_url: long_url.to_string(),
            token,
        };

        match self.repository.create(new_link).await {
            Ok(link) => Ok(Insertion::Inserted(link)),
            Err(StoreError::UniqueViolation(UniqueField::Token)) => Ok(Insertion::TokenTaken),
            Err(StoreError::UniqueViolation(UniqueField::LongUrl)) => {
                let existing = self
                    .repository
                    .find_by_long_url(long_url)
                    .await?
                    .ok_or_else(|| {
                        StoreError::Database(
                            "long_url conflict reported but no committed row found".to_string(),
                        )
                    })?;
                Ok(Insertion::LongUrlTaken(existing))
            }
            Err(e) => Err(e.into()),
        }
    }
}
