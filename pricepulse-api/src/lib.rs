use axum::{http::Method, routing::get, Router};
use chrono::Timelike;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod events;
pub mod market;
pub mod products;
pub mod rules;
pub mod state;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS for the dashboard client
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health))
        .merge(products::routes())
        .merge(market::routes())
        .merge(rules::routes())
        .merge(events::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

/// Wall-clock hour injected into the engine; only the API layer reads the
/// clock, the engine itself takes the hour as a parameter.
pub(crate) fn current_hour() -> u8 {
    chrono::Local::now().hour() as u8
}
