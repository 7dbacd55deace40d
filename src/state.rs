//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService, TokenPolicy};
use crate::domain::notifier::ChangeNotifier;
use crate::domain::repositories::LinkRepository;

/// Services and channels shared by every request.
///
/// Cloning is cheap: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub notifier: ChangeNotifier,
}

impl AppState {
    /// Wires both services to one store and notifier.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        notifier: ChangeNotifier,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            shorten_service: Arc::new(ShortenService::new(
                repository.clone(),
                notifier.clone(),
                policy,
            )),
            redirect_service: Arc::new(RedirectService::new(repository)),
            notifier,
        }
    }
}
