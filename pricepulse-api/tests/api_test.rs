use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use pricepulse_api::{app, AppState};
use pricepulse_shared::Product;
use pricepulse_store::app_config::MarketDefaults;
use pricepulse_store::{sample, MarketPatch, PricingStore};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

async fn test_app() -> (Router, Uuid) {
    let defaults = MarketDefaults {
        seasonal_demand: 0.8,
        market_trend: 0.2,
        elasticity: -1.5,
        stock_level: 100,
    };
    let store = Arc::new(PricingStore::new(sample::initial_market(&defaults, 12)));

    let product = sample::sample_product();
    let product_id = product.id;
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

    (app(AppState::new(store)), product_id)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_products_returns_seed_catalog() {
    let (app, product_id) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let products: Vec<Product> = serde_json::from_value(body).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, product_id);
    assert_eq!(products[0].sku, "WH-1000XM4");
}

#[tokio::test]
async fn test_optimize_applies_clamped_price() {
    let (app, product_id) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/products/{}/optimize", product_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result = json_body(response).await;
    let suggested = result["suggested_price"].as_f64().unwrap();
    assert!(suggested >= 349.99 * 0.5);
    assert!(suggested <= 349.99 * 2.0);
    let confidence = result["confidence"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&confidence));
    // The four market factors are always present
    assert!(result["factors"].as_array().unwrap().len() >= 4);

    // The store picked up the applied price and grew the history
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/products/{}", product_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let product: Product = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(product.current_price, suggested);
    assert_eq!(product.price_history.len(), 31);
}

#[tokio::test]
async fn test_optimize_unknown_product_is_404() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/products/{}/optimize", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rule_lifecycle() {
    let (app, _) = test_app().await;

    // Create
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/rules")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "name": "Weekend Sale",
                        "kind": "margin",
                        "condition": "0.2",
                        "adjustment": -0.05,
                        "priority": 50
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    let rule_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["active"], serde_json::json!(true));

    // Toggle off
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/v1/rules/{}/toggle", rule_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let toggled = json_body(response).await;
    assert_eq!(toggled["active"], serde_json::json!(false));

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/rules/{}", rule_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting again is a 404
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/v1/rules/{}", rule_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_market_patch() {
    let (app, _) = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/v1/market")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "market_trend": -0.4, "stock_level": 600 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let market = json_body(response).await;
    assert_eq!(market["market_trend"].as_f64().unwrap(), -0.4);
    assert_eq!(market["stock_level"].as_i64().unwrap(), 600);
    // Unpatched fields survive
    assert_eq!(market["elasticity"].as_f64().unwrap(), -1.5);
}
