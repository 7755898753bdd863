use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct PriceAppliedEvent {
    pub product_id: Uuid,
    pub old_price: f64,
    pub new_price: f64,
    pub confidence: f64,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct MarketTickEvent {
    pub competitor_avg: f64,
    pub market_trend: f64,
    pub seasonal_demand: f64,
    pub timestamp: i64,
}
