use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use pricepulse_shared::{PricingRule, RuleKind};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/rules", get(list_rules))
        .route("/v1/rules", post(create_rule))
        .route("/v1/rules/{id}", delete(delete_rule))
        .route("/v1/rules/{id}/toggle", post(toggle_rule))
}

#[derive(Debug, Deserialize)]
pub struct CreateRuleRequest {
    pub name: String,
    pub kind: RuleKind,
    pub condition: String,
    pub adjustment: f64,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// GET /v1/rules
async fn list_rules(State(state): State<AppState>) -> Json<Vec<PricingRule>> {
    Json(state.store.rules().await)
}

/// POST /v1/rules
async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> (StatusCode, Json<PricingRule>) {
    let rule = PricingRule {
        id: Uuid::new_v4(),
        name: req.name,
        kind: req.kind,
        condition: req.condition,
        adjustment: req.adjustment,
        priority: req.priority,
        active: req.active,
    };
    state.store.add_rule(rule.clone()).await;
    (StatusCode::CREATED, Json(rule))
}

/// DELETE /v1/rules/{id}
async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .remove_rule(id)
        .await
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/rules/{id}/toggle
async fn toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PricingRule>, AppError> {
    let rule = state
        .store
        .toggle_rule(id)
        .await
        .map_err(|e| AppError::NotFoundError(e.to_string()))?;
    Ok(Json(rule))
}
