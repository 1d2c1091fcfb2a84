//! Server-Sent Events change feed.
//!
//! Clients connect to `GET /stream` and receive one `{version, year, counts}`
//! message per observed change. Bursts collapse into a single message, so
//! intermediate versions may never be sent. The stream ends when the server
//! shuts down.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use tracing::debug;

use crate::state::AppState;

const KEEP_ALIVE: Duration = Duration::from_secs(15);

/// `GET /stream`
pub async fn change_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    debug!("change stream client connected");
    let feed = state.store.changes();

    let events = stream::unfold(feed, |mut feed| async move {
        let status = feed.next().await?;
        Some((Event::default().json_data(status), feed))
    })
    .take_until(state.shutdown_signal());

    Sse::new(events).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}
