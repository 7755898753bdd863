use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use pricepulse_engine::PriceOptimizer;
use pricepulse_shared::{OptimizationResult, Product};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/products", get(list_products))
        .route("/v1/products/{id}", get(get_product))
        .route("/v1/products/{id}/optimize", post(optimize_product))
}

/// GET /v1/products
async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store.list_products().await)
}

/// GET /v1/products/{id}
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = state
        .store
        .get_product(id)
        .await
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;
    Ok(Json(product))
}

/// POST /v1/products/{id}/optimize
///
/// Run the engine against the current market snapshot and rule set, apply
/// the suggested price to the stored product and broadcast the change.
async fn optimize_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OptimizationResult>, AppError> {
    let product = state
        .store
        .get_product(id)
        .await
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;
    let market = state.store.market().await;
    let rules = state.store.rules().await;

    let result = PriceOptimizer::new()
        .optimize(&product, &market, &rules, crate::current_hour())
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let event = state
        .store
        .apply_optimization(id, &result, &market)
        .await
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;

    // Nobody listening is fine
    let _ = state.sse_tx.send(event);

    Ok(Json(result))
}
