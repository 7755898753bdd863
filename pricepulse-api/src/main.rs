use pricepulse_api::{app, worker, AppState};
use pricepulse_store::{sample, MarketPatch, PricingStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pricepulse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = pricepulse_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting PricePulse API on port {}", config.server.port);

    let hour = chrono::Timelike::hour(&chrono::Local::now()) as u8;
    let store = Arc::new(PricingStore::new(sample::initial_market(
        &config.market,
        hour,
    )));

    // Seed the demo catalog and starter rules
    let product = sample::sample_product();
    store
        .update_market(MarketPatch {
            competitor_prices: Some(product.competitors.clone()),
            ..Default::default()
        })
        .await;
    store.upsert_product(product).await;
    for rule in sample::sample_rules() {
        store.add_rule(rule).await;
    }

    let app_state = AppState::new(store);

    if config.simulation.enabled {
        tokio::spawn(worker::run_simulation(
            app_state.clone(),
            config.simulation.clone(),
        ));
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app(app_state))
        .await
        .expect("Server error");
}
