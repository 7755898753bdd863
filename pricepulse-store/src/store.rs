use chrono::Utc;
use pricepulse_shared::events::PriceAppliedEvent;
use pricepulse_shared::{
    CompetitorPrice, MarketCondition, OptimizationResult, PricePoint, PricingRule, Product,
};
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Rule not found: {0}")]
    RuleNotFound(Uuid),
}

/// Partial update of the market condition; absent fields keep their
/// current value.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MarketPatch {
    pub competitor_prices: Option<Vec<CompetitorPrice>>,
    pub seasonal_demand: Option<f64>,
    pub market_trend: Option<f64>,
    pub time_of_day: Option<u8>,
    pub elasticity: Option<f64>,
    pub stock_level: Option<i32>,
}

struct StoreInner {
    products: HashMap<Uuid, Product>,
    market: MarketCondition,
    rules: Vec<PricingRule>,
}

/// In-memory pricing state shared across handlers and the simulation
/// worker. Nothing is persisted; the process owns the catalog for its
/// lifetime.
pub struct PricingStore {
    inner: RwLock<StoreInner>,
}

impl PricingStore {
    pub fn new(market: MarketCondition) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                products: HashMap::new(),
                market,
                rules: Vec::new(),
            }),
        }
    }

    pub async fn list_products(&self) -> Vec<Product> {
        let inner = self.inner.read().await;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    pub async fn product_ids(&self) -> Vec<Uuid> {
        self.inner.read().await.products.keys().copied().collect()
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, StoreError> {
        let inner = self.inner.read().await;
        inner
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::ProductNotFound(id))
    }

    pub async fn upsert_product(&self, product: Product) {
        let mut inner = self.inner.write().await;
        inner.products.insert(product.id, product);
    }

    pub async fn market(&self) -> MarketCondition {
        self.inner.read().await.market.clone()
    }

    /// Apply a partial market update, returning the resulting condition.
    pub async fn update_market(&self, patch: MarketPatch) -> MarketCondition {
        let mut inner = self.inner.write().await;
        if let Some(prices) = patch.competitor_prices {
            inner.market.competitor_prices = prices;
        }
        if let Some(seasonal) = patch.seasonal_demand {
            inner.market.seasonal_demand = seasonal.clamp(0.0, 1.0);
        }
        if let Some(trend) = patch.market_trend {
            inner.market.market_trend = trend;
        }
        if let Some(hour) = patch.time_of_day {
            inner.market.time_of_day = hour.min(23);
        }
        if let Some(elasticity) = patch.elasticity {
            inner.market.elasticity = elasticity;
        }
        if let Some(stock) = patch.stock_level {
            inner.market.stock_level = stock.max(0);
        }
        inner.market.clone()
    }

    pub async fn rules(&self) -> Vec<PricingRule> {
        self.inner.read().await.rules.clone()
    }

    pub async fn add_rule(&self, rule: PricingRule) {
        self.inner.write().await.rules.push(rule);
    }

    pub async fn remove_rule(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.rules.len();
        inner.rules.retain(|rule| rule.id != id);
        if inner.rules.len() == before {
            return Err(StoreError::RuleNotFound(id));
        }
        Ok(())
    }

    pub async fn toggle_rule(&self, id: Uuid) -> Result<PricingRule, StoreError> {
        let mut inner = self.inner.write().await;
        let rule = inner
            .rules
            .iter_mut()
            .find(|rule| rule.id == id)
            .ok_or(StoreError::RuleNotFound(id))?;
        rule.active = !rule.active;
        Ok(rule.clone())
    }

    /// Record an optimization outcome: set the product's current price and
    /// append a price-history point carrying the competitor average from
    /// the snapshot the engine saw.
    pub async fn apply_optimization(
        &self,
        product_id: Uuid,
        result: &OptimizationResult,
        market: &MarketCondition,
    ) -> Result<PriceAppliedEvent, StoreError> {
        let mut inner = self.inner.write().await;
        let product = inner
            .products
            .get_mut(&product_id)
            .ok_or(StoreError::ProductNotFound(product_id))?;

        let old_price = product.current_price;
        product.current_price = result.suggested_price;
        product.price_history.push(PricePoint {
            timestamp: Utc::now(),
            price: result.suggested_price,
            demand: product.demand,
            competitor_avg_price: competitor_average(&market.competitor_prices),
        });

        tracing::debug!(
            %product_id,
            old_price,
            new_price = result.suggested_price,
            "applied optimization"
        );

        Ok(PriceAppliedEvent {
            product_id,
            old_price,
            new_price: result.suggested_price,
            confidence: result.confidence,
            timestamp: Utc::now().timestamp(),
        })
    }
}

fn competitor_average(prices: &[CompetitorPrice]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    prices.iter().map(|cp| cp.price).sum::<f64>() / prices.len() as f64
}
