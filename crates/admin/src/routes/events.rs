//! Server-sent events for the staff dashboard.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use tokio::sync::broadcast::error::RecvError;
use tracing::instrument;

use crate::middleware::RequireStaffAuth;
use crate::state::AppState;

/// Stream change events to an authenticated dashboard.
///
/// Each event carries the topic as the SSE event name and the change
/// detail as JSON data. A subscriber that falls behind the broadcast
/// channel gets a `lagged` event and should reload its data.
#[instrument(skip(state, staff))]
pub async fn stream(
    State(state): State<AppState>,
    RequireStaffAuth(staff): RequireStaffAuth,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::info!(staff = %staff.name, "dashboard event stream opened");
    let mut rx = state.events().subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    let event = match serde_json::to_string(&change) {
                        Ok(data) => Event::default().event("change").data(data),
                        Err(e) => {
                            tracing::error!(error = %e, "change event serialization failed");
                            continue;
                        }
                    };
                    yield Ok(event);
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "dashboard subscriber lagged");
                    yield Ok(Event::default().event("lagged").data(missed.to_string()));
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
