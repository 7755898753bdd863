pub mod factors;
pub mod optimizer;
pub mod rules;

pub use optimizer::{OptimizeError, PriceOptimizer};
