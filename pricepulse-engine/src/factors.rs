use pricepulse_shared::{CompetitorPrice, MarketCondition, PriceFactor, Product};

/// Weight of the competitive positioning factor.
const COMPETITIVE_WEIGHT: f64 = 0.3;
/// Weight of the demand elasticity factor.
const ELASTICITY_WEIGHT: f64 = 0.15;
/// Weight of the inventory level factor.
const INVENTORY_WEIGHT: f64 = 0.2;
/// Weight of the market trend factor.
const TREND_WEIGHT: f64 = 0.1;

/// Demand level at which the elasticity factor is neutral.
const REFERENCE_DEMAND: f64 = 50.0;
/// Stock level at which the inventory factor is neutral.
const REFERENCE_STOCK: f64 = 200.0;

/// Mean of the competitor snapshot, 0 when the snapshot is empty.
pub fn competitor_average(prices: &[CompetitorPrice]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }
    prices.iter().map(|cp| cp.price).sum::<f64>() / prices.len() as f64
}

/// Price pressure from the average competitor price, saturating as the
/// market diverges from the base price.
pub fn competitive_factor(base_price: f64, competitor_avg: f64) -> f64 {
    let diff = (competitor_avg - base_price) / base_price;
    COMPETITIVE_WEIGHT * diff.tanh()
}

/// Sensitivity to demand deviating from the reference level, amplified by
/// elasticity magnitude.
pub fn elasticity_factor(elasticity: f64, demand: f64) -> f64 {
    ELASTICITY_WEIGHT * (elasticity * (demand / REFERENCE_DEMAND - 1.0)).tanh()
}

/// Surplus stock pushes price down, scarcity up, symmetrically around the
/// reference stock level.
pub fn inventory_factor(stock_level: i32) -> f64 {
    -INVENTORY_WEIGHT * (stock_level as f64 / 100.0 - REFERENCE_STOCK / 100.0).tanh()
}

/// Bounded pass-through of market momentum.
pub fn trend_factor(market_trend: f64) -> f64 {
    TREND_WEIGHT * market_trend.tanh()
}

/// Compute the four baseline market factors. All four are reported
/// regardless of magnitude.
pub fn market_factors(product: &Product, market: &MarketCondition) -> Vec<PriceFactor> {
    let competitor_avg = competitor_average(&market.competitor_prices);

    vec![
        PriceFactor {
            name: "Competitive Positioning".to_string(),
            impact: competitive_factor(product.base_price, competitor_avg),
            description: format!(
                "Adjustment based on average competitor price of ${:.2}",
                competitor_avg
            ),
        },
        PriceFactor {
            name: "Demand Elasticity".to_string(),
            impact: elasticity_factor(market.elasticity, product.demand),
            description: "Price sensitivity adjustment based on current demand".to_string(),
        },
        PriceFactor {
            name: "Inventory Level".to_string(),
            impact: inventory_factor(market.stock_level),
            description: format!(
                "Adjustment based on current stock level of {} units",
                market.stock_level
            ),
        },
        PriceFactor {
            name: "Market Trend".to_string(),
            impact: trend_factor(market.market_trend),
            description: format!(
                "Market trend adjustment of {:.1}%",
                market.market_trend * 100.0
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competitor_average_empty_snapshot() {
        assert_eq!(competitor_average(&[]), 0.0);
    }

    #[test]
    fn test_competitive_factor_saturates() {
        // Competitors 10% above base
        let near = competitive_factor(100.0, 110.0);
        assert!((near - 0.3 * 0.1_f64.tanh()).abs() < 1e-12);

        // Arbitrarily divergent competitors stay bounded
        let far = competitive_factor(100.0, 100_000.0);
        assert!(far < 0.3);
        assert!(far > near);
    }

    #[test]
    fn test_elasticity_factor_neutral_at_reference_demand() {
        assert_eq!(elasticity_factor(-1.5, 50.0), 0.0);
        // Inelastic product is insensitive to demand swings
        assert_eq!(elasticity_factor(0.0, 95.0), 0.0);
    }

    #[test]
    fn test_inventory_factor_direction() {
        assert_eq!(inventory_factor(200), 0.0);
        // Surplus pushes down, scarcity pushes up
        assert!(inventory_factor(500) < 0.0);
        assert!(inventory_factor(10) > 0.0);
    }

    #[test]
    fn test_trend_factor_monotonic() {
        let mut last = trend_factor(-1.0);
        for trend in [-0.5, -0.1, 0.0, 0.1, 0.5, 1.0] {
            let current = trend_factor(trend);
            assert!(current > last);
            last = current;
        }
    }
}
