//! Change notification for views of the mapping table.
//!
//! [`ChangeNotifier`] is a best-effort broadcast signal: publishing tells every
//! current listener that the table changed so it can re-fetch its listing.
//! It is not a queue. Events published with no listeners are dropped, and a
//! listener that subscribes later never sees them.
//!
//! Each [`Subscription`] is one-shot. [`Subscription::recv`] consumes it, so a
//! listening context subscribes again for every change it wants to observe.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

/// Well-known channel carrying mapping table changes.
pub const LINKS_CHANNEL: &str = "links";

/// Buffered events per listener before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Event broadcast on the links channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEvent {
    /// The mapping table changed; listeners should refresh their listing.
    Updated,
}

impl ChangeEvent {
    /// Event name as sent to remote listeners.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
        }
    }
}

/// Broadcast publisher for [`ChangeEvent`]s.
///
/// Cloning is cheap; all clones publish on the same channel.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    channel: &'static str,
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeNotifier {
    /// Creates a notifier on [`LINKS_CHANNEL`].
    ///
    /// A `capacity` of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            channel: LINKS_CHANNEL,
            sender,
        }
    }

    /// Name of the channel this notifier publishes on.
    pub fn channel(&self) -> &'static str {
        self.channel
    }

    /// Publishes `event` to every current listener.
    ///
    /// Returns the number of listeners the event was delivered to.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        match self.sender.send(event) {
            Ok(listeners) => {
                debug!(channel = self.channel, event = event.name(), listeners, "Change published");
                listeners
            }
            Err(_) => {
                debug!(channel = self.channel, event = event.name(), "No listeners for change");
                0
            }
        }
    }

    /// Opens a one-shot subscription for the next event.
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of open subscriptions.
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

/// A pending listener registered with a [`ChangeNotifier`].
///
/// Dropping the subscription unsubscribes it.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl Subscription {
    /// Waits for the next event and unsubscribes.
    ///
    /// Returns `None` once every notifier handle has been dropped. A listener
    /// that fell behind still receives [`ChangeEvent::Updated`], since missed
    /// events only ever mean "refresh".
    pub async fn recv(mut self) -> Option<ChangeEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(RecvError::Lagged(skipped)) => {
                debug!(skipped, "Listener lagged behind change notifications");
                Some(ChangeEvent::Updated)
            }
            Err(RecvError::Closed) => None,
        }
    }
}
