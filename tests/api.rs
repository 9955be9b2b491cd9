//! End-to-end tests of the REST router, driven through `tower::ServiceExt`.

#![allow(clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tower::ServiceExt;

use resale_research::api;
use resale_research::app_state::AppState;
use resale_research::domain::{FetchBatch, Keyword, Listing, Price, Session, ShopRating};
use resale_research::ingest::Ingestor;
use resale_research::service::ResearchService;

fn captured_at() -> NaiveDateTime {
    let Ok(ts) = NaiveDateTime::parse_from_str("2025-01-15 10:30:00", "%Y-%m-%d %H:%M:%S") else {
        panic!("valid timestamp");
    };
    ts
}

fn coffee_listing(price: f64, sales: u64, rating: f64) -> Listing {
    let Ok(price) = Price::new(price) else {
        panic!("valid price");
    };
    let Ok(rating) = ShopRating::from_reported(rating) else {
        panic!("valid rating");
    };
    Listing::new(captured_at(), Keyword::Coffee, "UCC ドリップコーヒー", price, sales, rating)
}

fn app_with(session: Session) -> Router {
    let research_service = Arc::new(ResearchService::new(session, Ingestor::default(), None));
    api::build_router().with_state(AppState { research_service })
}

fn coffee_app() -> Router {
    let mut session = Session::default();
    let batch = FetchBatch::new(
        captured_at(),
        vec![
            coffee_listing(300.0, 50, 4.0),
            coffee_listing(500.0, 150, 4.6),
            coffee_listing(800.0, 300, 4.8),
        ],
    );
    let Ok(_) = session.ingest(batch) else {
        panic!("ingest failed");
    };
    app_with(session)
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    };
    let Ok(request) = request else {
        panic!("bad request for {uri}");
    };
    let Ok(response) = app.oneshot(request).await else {
        panic!("router failed for {uri}");
    };
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("unreadable body for {uri}");
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("non-json body for {uri}");
        };
        value
    };
    (status, value)
}

fn prices(body: &Value) -> Vec<f64> {
    let Some(data) = body.get("data").and_then(Value::as_array) else {
        panic!("missing data array");
    };
    data.iter()
        .filter_map(|l| l.get("price").and_then(Value::as_f64))
        .collect()
}

#[tokio::test]
async fn health_reports_store_status() {
    let (status, body) = send(coffee_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("status"), Some(&json!("healthy")));
    assert_eq!(body.get("listings"), Some(&json!(3)));
    assert_eq!(body.get("batches"), Some(&json!(1)));
    assert_eq!(body.get("latest_fetch"), Some(&json!("2025-01-15 10:30:00")));
}

#[tokio::test]
async fn keyword_catalog_lists_all_categories() {
    let (status, body) = send(coffee_app(), "GET", "/config/keywords", None).await;
    assert_eq!(status, StatusCode::OK);
    let Some(entries) = body.as_array() else {
        panic!("expected array");
    };
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().any(|e| {
        e.get("keyword") == Some(&json!("coffee")) && e.get("search_term") == Some(&json!("日本 咖啡"))
    }));
}

#[tokio::test]
async fn coffee_scenario_filter_and_rank() {
    let (status, body) = send(
        coffee_app(),
        "GET",
        "/api/v1/listings?keywords=coffee&min_sales=100&sort=profit&direction=descending",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("count"), Some(&json!(2)));
    assert_eq!(prices(&body), vec![800.0, 500.0]);

    let Some(first) = body.pointer("/data/0") else {
        panic!("missing first listing");
    };
    assert_eq!(first.get("index"), Some(&json!(2)));
    assert_eq!(first.get("treasure"), Some(&json!(true)));
    let profit = first.get("estimated_profit").and_then(Value::as_f64);
    assert!(profit.is_some_and(|p| (p - 1336.0).abs() < 1e-9));
}

#[tokio::test]
async fn ascending_sort_with_limit() {
    let (status, body) = send(
        coffee_app(),
        "GET",
        "/api/v1/listings?sort=price&direction=ascending&limit=2",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices(&body), vec![300.0, 500.0]);
}

#[tokio::test]
async fn empty_keyword_list_returns_nothing() {
    let (status, body) = send(coffee_app(), "GET", "/api/v1/listings?keywords=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("count"), Some(&json!(0)));
}

#[tokio::test]
async fn unknown_keyword_is_bad_request() {
    let (status, body) = send(coffee_app(), "GET", "/api/v1/listings?keywords=tea", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.pointer("/error/code"), Some(&json!(1001)));
}

#[tokio::test]
async fn request_overrides_are_scoped() {
    let app = coffee_app();
    let (status, body) = send(
        app.clone(),
        "GET",
        "/api/v1/listings?limit=1&fixed_cost=0",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let profit = body
        .pointer("/data/0/estimated_profit")
        .and_then(Value::as_f64);
    assert!(profit.is_some_and(|p| (p - 1536.0).abs() < 1e-9));

    let (_, params) = send(app, "GET", "/api/v1/parameters", None).await;
    assert_eq!(params.get("fixed_cost"), Some(&json!(200.0)));
}

#[tokio::test]
async fn invalid_parameters_are_rejected_without_change() {
    let app = coffee_app();
    let (status, body) = send(
        app.clone(),
        "PUT",
        "/api/v1/parameters",
        Some(json!({
            "exchange_rate": 4.8,
            "fee_rate": 1.5,
            "fixed_cost": 200.0,
            "cost_rate": 0.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.pointer("/error/code"), Some(&json!(1002)));

    let (_, params) = send(app, "GET", "/api/v1/parameters", None).await;
    assert_eq!(params.get("fee_rate"), Some(&json!(0.1)));
}

#[tokio::test]
async fn parameter_update_recomputes_treasures() {
    let app = coffee_app();
    let (status, _) = send(
        app.clone(),
        "PUT",
        "/api/v1/parameters",
        Some(json!({
            "exchange_rate": 4.8,
            "fee_rate": 0.1,
            "fixed_cost": 500.0,
            "cost_rate": 0.5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 500 × 1.92 − 500 = 460, below the treasure threshold.
    let (status, body) = send(app, "GET", "/api/v1/treasures", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices(&body), vec![800.0]);
}

#[tokio::test]
async fn aggregate_sums_by_keyword() {
    let (status, body) = send(
        coffee_app(),
        "GET",
        "/api/v1/analytics/aggregate?metric=sales&op=sum",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.pointer("/values/coffee"), Some(&json!(500.0)));
    assert!(body.pointer("/values/snacks").is_none());
}

#[tokio::test]
async fn metrics_and_categories() {
    let app = coffee_app();
    let (status, metrics) = send(app.clone(), "GET", "/api/v1/analytics/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics.get("products"), Some(&json!(3)));
    assert_eq!(metrics.get("treasure_count"), Some(&json!(2)));

    let (status, categories) =
        send(app, "GET", "/api/v1/analytics/categories?latest=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories.pointer("/data/0/keyword"), Some(&json!("coffee")));
    assert_eq!(categories.pointer("/data/0/total_sales"), Some(&json!(500)));
}

#[tokio::test]
async fn assistant_known_and_missing() {
    let app = coffee_app();
    let (status, body) = send(
        app.clone(),
        "GET",
        "/api/v1/listings/1/assistant?premium_rate=0.1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let premium = body.pointer("/quote/premium").and_then(Value::as_f64);
    assert!(premium.is_some_and(|p| (p - 330.0).abs() < 1e-9));
    assert_eq!(
        body.pointer("/hashtags").and_then(Value::as_array).map(Vec::len),
        Some(7)
    );

    let (status, body) = send(app, "GET", "/api/v1/listings/42/assistant", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.pointer("/error/code"), Some(&json!(2001)));
}

#[tokio::test]
async fn refresh_appends_a_batch() {
    let app = app_with(Session::default());
    let (status, report) = send(
        app.clone(),
        "POST",
        "/api/v1/refresh",
        Some(json!({ "mode": "sample", "keywords": ["beauty"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let admitted = report.get("admitted").and_then(Value::as_u64);
    assert!(admitted.is_some_and(|n| n > 0));
    assert_eq!(report.get("total").and_then(Value::as_u64), admitted);

    let (_, body) = send(app, "GET", "/api/v1/listings?keywords=beauty", None).await;
    assert_eq!(body.get("count").and_then(Value::as_u64), admitted);
}

#[tokio::test]
async fn openapi_document_lists_paths() {
    let (status, doc) = send(coffee_app(), "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc.pointer("/paths/~1api~1v1~1listings").is_some());
    assert!(doc.pointer("/paths/~1health").is_some());
}
