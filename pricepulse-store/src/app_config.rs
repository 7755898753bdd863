use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
    pub market: MarketDefaults,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Settings for the background market simulation loop.
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    /// Restrict the simulation to a single product when set; the whole
    /// catalog is re-optimized otherwise.
    #[serde(default)]
    pub product_id: Option<uuid::Uuid>,
}

fn default_enabled() -> bool {
    true
}

fn default_tick_seconds() -> u64 {
    5
}

/// Initial market condition before any simulation tick or caller update.
#[derive(Debug, Deserialize, Clone)]
pub struct MarketDefaults {
    pub seasonal_demand: f64,
    pub market_trend: f64,
    pub elasticity: f64,
    pub stock_level: i32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Layer the current environment file on top (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables, e.g. PRICEPULSE__SERVER__PORT=8080
            .add_source(config::Environment::with_prefix("PRICEPULSE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
