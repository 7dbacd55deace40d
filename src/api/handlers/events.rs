//! Server-Sent Events stream of link table changes.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream, StreamExt};
use std::{convert::Infallible, future};
use tracing::debug;

use crate::state::AppState;

/// Streams the next change to the link table, then closes.
///
/// # Endpoint
///
/// `GET /links/events`
///
/// Each connection is a one-shot listener: it receives a single `updated`
/// event when a link is created and the stream ends. Clients reconnect to
/// keep listening. Keep-alive comments are sent while waiting.
///
/// ```text
/// event: updated
/// data: links
/// ```
pub async fn link_events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let channel = state.notifier.channel();
    let subscription = state.notifier.subscribe();
    debug!(channel, "Change listener connected");

    let stream = stream::once(subscription.recv()).filter_map(move |event| {
        future::ready(event.map(|event| Ok(Event::default().event(event.name()).data(channel))))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
