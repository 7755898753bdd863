use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced catalog entry together with its market observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    /// Reference price, always > 0.
    pub base_price: f64,
    /// Last suggested/applied price.
    pub current_price: f64,
    pub inventory: i32,
    /// Units per period, non-negative.
    pub demand: f64,
    pub competitors: Vec<CompetitorPrice>,
    pub sales_history: Vec<SaleRecord>,
    pub price_history: Vec<PricePoint>,
}

/// One observed competitor price. Immutable observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorPrice {
    pub competitor: String,
    pub price: f64,
    pub observed_at: DateTime<Utc>,
    pub in_stock: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub timestamp: DateTime<Utc>,
    pub quantity: u32,
    pub price: f64,
    pub revenue: f64,
}

/// One entry of a product's applied-price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub demand: f64,
    pub competitor_avg_price: f64,
}

/// Current market snapshot, supplied fresh per optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketCondition {
    /// Competitor snapshot for the channel, not the product's own history.
    pub competitor_prices: Vec<CompetitorPrice>,
    /// Seasonal demand signal in [0, 1].
    pub seasonal_demand: f64,
    /// Signed momentum, roughly [-1, 1].
    pub market_trend: f64,
    /// Hour of day, 0..=23.
    pub time_of_day: u8,
    /// Signed price sensitivity; magnitude amplifies demand deviation.
    pub elasticity: f64,
    /// Channel-wide stock signal, distinct from `Product::inventory`.
    pub stock_level: i32,
}

/// The closed set of pricing rule kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Margin,
    Competitive,
    Inventory,
    Time,
}

/// A user-configured, prioritized pricing rule applied on top of the
/// baseline market factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: Uuid,
    pub name: String,
    pub kind: RuleKind,
    /// Single numeric parameter, interpreted per kind.
    pub condition: String,
    /// Signed magnitude multiplied into the rule's effect.
    pub adjustment: f64,
    /// Higher priority rules are evaluated and reported first.
    pub priority: i32,
    pub active: bool,
}

impl PricingRule {
    pub fn new(name: impl Into<String>, kind: RuleKind, condition: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            condition: condition.into(),
            adjustment: 0.0,
            priority: 0,
            active: true,
        }
    }
}

/// One named, explained contribution to the total price adjustment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFactor {
    pub name: String,
    /// Signed fractional multiplier on the base price (+0.05 = +5%).
    pub impact: f64,
    pub description: String,
}

/// Output of one optimization call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Always within [0.5 x base_price, 2.0 x base_price].
    pub suggested_price: f64,
    /// Display heuristic in [0, 100], not a statistical guarantee.
    pub confidence: f64,
    /// Sorted by descending |impact|, stable for ties.
    pub factors: Vec<PriceFactor>,
}
