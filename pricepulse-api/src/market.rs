use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use pricepulse_shared::MarketCondition;
use pricepulse_store::MarketPatch;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/market", get(get_market))
        .route("/v1/market", patch(patch_market))
}

/// GET /v1/market
async fn get_market(State(state): State<AppState>) -> Json<MarketCondition> {
    Json(state.store.market().await)
}

/// PATCH /v1/market
async fn patch_market(
    State(state): State<AppState>,
    Json(body): Json<MarketPatch>,
) -> Json<MarketCondition> {
    Json(state.store.update_market(body).await)
}
