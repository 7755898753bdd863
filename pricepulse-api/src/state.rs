use pricepulse_shared::events::{MarketTickEvent, PriceAppliedEvent};
use pricepulse_store::PricingStore;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PricingStore>,
    pub sse_tx: broadcast::Sender<PriceAppliedEvent>,
    pub market_tx: broadcast::Sender<MarketTickEvent>,
}

impl AppState {
    pub fn new(store: Arc<PricingStore>) -> Self {
        let (sse_tx, _) = broadcast::channel(100);
        let (market_tx, _) = broadcast::channel(100);
        Self {
            store,
            sse_tx,
            market_tx,
        }
    }
}
