use crate::factors;
use crate::rules;
use pricepulse_shared::{MarketCondition, OptimizationResult, PriceFactor, PricingRule, Product};

/// Lower clamp bound as a multiple of the base price.
const MIN_PRICE_RATIO: f64 = 0.5;
/// Upper clamp bound as a multiple of the base price.
const MAX_PRICE_RATIO: f64 = 2.0;

/// Optimization precondition failures. Per-rule problems never surface
/// here; a bad rule is skipped, a bad product or market aborts the call.
#[derive(Debug, thiserror::Error)]
pub enum OptimizeError {
    #[error("base price must be positive, got {0}")]
    NonPositiveBasePrice(f64),

    #[error("inventory must be non-negative, got {0}")]
    NegativeInventory(i32),

    #[error("demand must be non-negative, got {0}")]
    NegativeDemand(f64),

    #[error("stock level must be non-negative, got {0}")]
    NegativeStockLevel(i32),

    #[error("hour of day out of range: {0}")]
    HourOutOfRange(u8),
}

/// Stateless price optimization engine.
///
/// Pure function of its inputs: the same product, market snapshot, rule
/// set and hour always produce the identical result, so instances can be
/// shared freely across tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceOptimizer;

impl PriceOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Compute a suggested price for the product under the given market
    /// snapshot and rule set.
    ///
    /// `now_hour` is the invocation's wall-clock hour (0..=23), injected by
    /// the caller so time-based rules stay deterministic under test.
    pub fn optimize(
        &self,
        product: &Product,
        market: &MarketCondition,
        rules: &[PricingRule],
        now_hour: u8,
    ) -> Result<OptimizationResult, OptimizeError> {
        validate(product, market, now_hour)?;

        // Baseline market factors, always reported
        let mut all_factors = factors::market_factors(product, market);
        let market_adjustment: f64 = all_factors.iter().map(|f| f.impact).sum();

        // Custom pricing rules on top
        let rule_outcome = rules::apply_rules(product, rules, now_hour);
        let total_adjustment = market_adjustment + rule_outcome.adjustment;
        all_factors.extend(rule_outcome.factors);

        let raw_price = product.base_price * (1.0 + total_adjustment);
        let suggested_price = raw_price.clamp(
            product.base_price * MIN_PRICE_RATIO,
            product.base_price * MAX_PRICE_RATIO,
        );

        let confidence = confidence_score(&all_factors);

        all_factors.sort_by(|a, b| {
            b.impact
                .abs()
                .partial_cmp(&a.impact.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(OptimizationResult {
            suggested_price,
            confidence,
            factors: all_factors,
        })
    }
}

fn validate(
    product: &Product,
    market: &MarketCondition,
    now_hour: u8,
) -> Result<(), OptimizeError> {
    if !(product.base_price > 0.0) {
        return Err(OptimizeError::NonPositiveBasePrice(product.base_price));
    }
    if product.inventory < 0 {
        return Err(OptimizeError::NegativeInventory(product.inventory));
    }
    if !(product.demand >= 0.0) {
        return Err(OptimizeError::NegativeDemand(product.demand));
    }
    if market.stock_level < 0 {
        return Err(OptimizeError::NegativeStockLevel(market.stock_level));
    }
    if now_hour > 23 {
        return Err(OptimizeError::HourOutOfRange(now_hour));
    }
    Ok(())
}

/// Score how consistent the factor magnitudes are. Defined as 0 for an
/// empty factor list and for all-zero impacts, where the raw formula would
/// divide by zero or report full confidence in a price nothing moved.
fn confidence_score(factors: &[PriceFactor]) -> f64 {
    if factors.is_empty() {
        return 0.0;
    }

    let impacts: Vec<f64> = factors.iter().map(|f| f.impact.abs()).collect();
    let total: f64 = impacts.iter().sum();
    if total == 0.0 {
        return 0.0;
    }

    let avg = total / impacts.len() as f64;
    let variance =
        impacts.iter().map(|i| (i - avg).powi(2)).sum::<f64>() / impacts.len() as f64;
    let consistency = 1.0 - variance.sqrt();

    (consistency * 100.0).clamp(0.0, 100.0)
}
