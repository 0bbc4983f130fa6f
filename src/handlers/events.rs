// Server-sent events feed for token-sale progress
//
// Every successful primary-market purchase pushes the refreshed sale
// figures here so open storefront tabs update their progress bars without
// a reload.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use tokio::sync::broadcast::error::RecvError;

use crate::handlers::AppState;

/// Handler for GET /events/assets
pub async fn asset_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sale_events.subscribe();

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(update) => match Event::default().event("asset-sale").json_data(&update) {
                    Ok(event) => return Some((Ok::<_, Infallible>(event), rx)),
                    Err(e) => {
                        tracing::warn!("failed to encode sale update: {}", e);
                        continue;
                    }
                },
                // A slow tab skips the updates it missed and keeps following
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "sale event subscriber lagged");
                    continue;
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
