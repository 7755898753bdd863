pub mod events;
pub mod models;

pub use models::{
    CompetitorPrice, MarketCondition, OptimizationResult, PriceFactor, PricePoint, PricingRule,
    Product, RuleKind, SaleRecord,
};
