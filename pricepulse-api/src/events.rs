use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/events", get(stream_events))
}

/// GET /v1/events
///
/// Server-sent stream of applied price changes and market ticks. Lagged
/// subscribers drop missed events rather than closing the stream.
async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let prices = BroadcastStream::new(state.sse_tx.subscribe()).filter_map(|msg| match msg {
        Ok(event) => Event::default()
            .event("price_applied")
            .json_data(&event)
            .ok()
            .map(Ok),
        Err(_) => None,
    });
    let ticks = BroadcastStream::new(state.market_tx.subscribe()).filter_map(|msg| match msg {
        Ok(event) => Event::default()
            .event("market_tick")
            .json_data(&event)
            .ok()
            .map(Ok),
        Err(_) => None,
    });

    Sse::new(prices.merge(ticks)).keep_alive(KeepAlive::default())
}
