//! Caller-owned listing of links for display.

use crate::application::services::RedirectService;
use crate::domain::entities::Link;
use crate::domain::notifier::Subscription;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Latest listing of links, most recently updated first.
///
/// The store returns links oldest first; the view reverses them when it
/// refreshes. Each owner keeps its own view and decides when to refresh it.
#[derive(Debug, Clone, Default)]
pub struct LinkListView {
    items: Vec<Link>,
}

impl LinkListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Link] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Re-reads the listing from the store.
    pub async fn refresh<R>(&mut self, service: &RedirectService<R>) -> Result<(), AppError>
    where
        R: LinkRepository + ?Sized,
    {
        let mut items = service.list_all().await?;
        items.reverse();
        self.items = items;
        Ok(())
    }

    /// Waits for one change notification, then refreshes.
    ///
    /// Returns `false` without refreshing if the notifier was dropped.
    pub async fn refresh_on_change<R>(
        &mut self,
        subscription: Subscription,
        service: &RedirectService<R>,
    ) -> Result<bool, AppError>
    where
        R: LinkRepository + ?Sized,
    {
        if subscription.recv().await.is_none() {
            return Ok(false);
        }
        self.refresh(service).await?;
        Ok(true)
    }
}
