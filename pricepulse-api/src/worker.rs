use pricepulse_engine::factors::competitor_average;
use pricepulse_engine::PriceOptimizer;
use pricepulse_shared::events::MarketTickEvent;
use pricepulse_shared::CompetitorPrice;
use pricepulse_store::app_config::SimulationConfig;
use pricepulse_store::MarketPatch;
use rand::Rng;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::state::AppState;

/// Periodically jitter the market and re-optimize the catalog, standing in
/// for a live competitor/demand feed. Failures are logged and never stop
/// the loop.
pub async fn run_simulation(state: AppState, cfg: SimulationConfig) {
    let mut ticker = interval(Duration::from_secs(cfg.tick_seconds.max(1)));
    info!("Market simulation started, tick every {}s", cfg.tick_seconds);

    loop {
        ticker.tick().await;
        if let Err(e) = simulate_tick(&state, &cfg).await {
            error!("Simulation tick failed: {}", e);
        }
    }
}

async fn simulate_tick(state: &AppState, cfg: &SimulationConfig) -> anyhow::Result<()> {
    let mut products = state.store.list_products().await;
    if let Some(id) = cfg.product_id {
        products.retain(|p| p.id == id);
    }
    if products.is_empty() {
        return Ok(());
    }

    // Drift the market: jitter observed competitor prices around the
    // catalog's own observations, redraw the seasonal/trend signals
    let competitor_prices: Vec<CompetitorPrice> = products
        .iter()
        .flat_map(|p| p.competitors.iter())
        .map(|cp| CompetitorPrice {
            competitor: cp.competitor.clone(),
            price: cp.price + rand::thread_rng().gen_range(-1.0..1.0),
            observed_at: chrono::Utc::now(),
            in_stock: cp.in_stock,
        })
        .collect();

    let patch = MarketPatch {
        competitor_prices: Some(competitor_prices),
        seasonal_demand: Some(rand::thread_rng().gen_range(0.0..1.0)),
        market_trend: Some(rand::thread_rng().gen_range(-0.1..0.1)),
        time_of_day: Some(crate::current_hour()),
        ..Default::default()
    };
    let market = state.store.update_market(patch).await;

    let _ = state.market_tx.send(MarketTickEvent {
        competitor_avg: competitor_average(&market.competitor_prices),
        market_trend: market.market_trend,
        seasonal_demand: market.seasonal_demand,
        timestamp: chrono::Utc::now().timestamp(),
    });

    let rules = state.store.rules().await;
    let optimizer = PriceOptimizer::new();
    for product in &products {
        // One bad product must not block repricing the rest
        let result = match optimizer.optimize(product, &market, &rules, market.time_of_day) {
            Ok(result) => result,
            Err(e) => {
                error!(product_id = %product.id, "Skipping product this tick: {}", e);
                continue;
            }
        };
        match state
            .store
            .apply_optimization(product.id, &result, &market)
            .await
        {
            Ok(event) => {
                let _ = state.sse_tx.send(event);
            }
            Err(e) => error!(product_id = %product.id, "Failed to apply price: {}", e),
        }
    }

    Ok(())
}
