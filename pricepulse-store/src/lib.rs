pub mod app_config;
pub mod sample;
pub mod store;

pub use store::{MarketPatch, PricingStore, StoreError};
