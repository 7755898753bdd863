use crate::app_config::MarketDefaults;
use chrono::{Duration, Utc};
use pricepulse_shared::{
    CompetitorPrice, MarketCondition, PricePoint, PricingRule, Product, RuleKind, SaleRecord,
};
use rand::Rng;
use uuid::Uuid;

/// Build the initial market condition from configured defaults.
pub fn initial_market(defaults: &MarketDefaults, time_of_day: u8) -> MarketCondition {
    MarketCondition {
        competitor_prices: vec![],
        seasonal_demand: defaults.seasonal_demand,
        market_trend: defaults.market_trend,
        time_of_day,
        elasticity: defaults.elasticity,
        stock_level: defaults.stock_level,
    }
}

/// Demo catalog entry with 30 days of randomized sales and price history.
pub fn sample_product() -> Product {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let base_price = 349.99;

    let competitors = vec![
        competitor("Amazon", 348.99, true),
        competitor("Best Buy", 349.99, true),
        competitor("Walmart", 347.99, false),
    ];

    let sales_history: Vec<SaleRecord> = (0..30)
        .map(|days_ago| {
            let quantity = rng.gen_range(1..=10);
            SaleRecord {
                timestamp: now - Duration::days(days_ago),
                quantity,
                price: base_price,
                revenue: base_price * f64::from(quantity),
            }
        })
        .collect();

    let price_history: Vec<PricePoint> = (0..30)
        .map(|days_ago| PricePoint {
            timestamp: now - Duration::days(days_ago),
            price: base_price + rng.gen_range(-10.0..10.0),
            demand: 50.0 + rng.gen_range(-10.0..10.0),
            competitor_avg_price: 348.99 + rng.gen_range(-5.0..5.0),
        })
        .collect();

    Product {
        id: Uuid::new_v4(),
        name: "Premium Wireless Headphones".to_string(),
        sku: "WH-1000XM4".to_string(),
        category: "Electronics".to_string(),
        base_price,
        current_price: base_price,
        inventory: 500,
        demand: 50.0,
        competitors,
        sales_history,
        price_history,
    }
}

/// Starter rule set exercising each rule kind.
pub fn sample_rules() -> Vec<PricingRule> {
    vec![
        PricingRule {
            id: Uuid::new_v4(),
            name: "Protect Margin".to_string(),
            kind: RuleKind::Margin,
            condition: "0.15".to_string(),
            adjustment: -0.1,
            priority: 100,
            active: true,
        },
        PricingRule {
            id: Uuid::new_v4(),
            name: "Track Amazon".to_string(),
            kind: RuleKind::Competitive,
            condition: "348.99".to_string(),
            adjustment: 0.2,
            priority: 90,
            active: true,
        },
        PricingRule {
            id: Uuid::new_v4(),
            name: "Clear Overstock".to_string(),
            kind: RuleKind::Inventory,
            condition: "400".to_string(),
            adjustment: 0.15,
            priority: 80,
            active: true,
        },
        PricingRule {
            id: Uuid::new_v4(),
            name: "Evening Peak".to_string(),
            kind: RuleKind::Time,
            condition: "18".to_string(),
            adjustment: 0.05,
            priority: 70,
            active: false,
        },
    ]
}

fn competitor(name: &str, price: f64, in_stock: bool) -> CompetitorPrice {
    CompetitorPrice {
        competitor: name.to_string(),
        price,
        observed_at: Utc::now(),
        in_stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_product_is_valid_engine_input() {
        let product = sample_product();
        assert!(product.base_price > 0.0);
        assert!(product.inventory >= 0);
        assert!(product.demand >= 0.0);
        assert_eq!(product.sales_history.len(), 30);
        assert_eq!(product.price_history.len(), 30);
    }

    #[test]
    fn test_sample_rules_cover_every_kind() {
        let rules = sample_rules();
        for kind in [
            RuleKind::Margin,
            RuleKind::Competitive,
            RuleKind::Inventory,
            RuleKind::Time,
        ] {
            assert!(rules.iter().any(|r| r.kind == kind));
        }
        // Every condition parses as the engine expects
        for rule in &rules {
            assert!(rule.condition.parse::<f64>().is_ok());
        }
    }
}
