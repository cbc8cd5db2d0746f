#![allow(clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::{build_router, timeout_layer};
use crate::app_state::AppState;
use crate::domain::LocationQuery;
use crate::error::GatewayError;
use crate::persistence::{MemoryLedger, SearchLedger, SearchRecord};
use crate::provider::{CurrentPayload, ForecastPayload, WeatherProvider, classify_provider_status};
use crate::service::{HistoryWriter, WeatherService};

#[derive(Debug, Default)]
struct StubProvider {
    fail_with: Option<(u16, &'static str)>,
    calls: AtomicUsize,
}

impl StubProvider {
    fn failing(status: u16, message: &'static str) -> Self {
        Self {
            fail_with: Some((status, message)),
            calls: AtomicUsize::new(0),
        }
    }

    fn check(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with {
            Some((code, message)) => {
                let Ok(status) = reqwest::StatusCode::from_u16(code) else {
                    panic!("invalid status");
                };
                Err(classify_provider_status(status, Some(message.to_string())))
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentPayload, GatewayError> {
        self.check()?;
        let name = match query {
            LocationQuery::City(name) => name.clone(),
            LocationQuery::Coordinates { .. } => "Greenwich".to_string(),
        };
        let Ok(payload) = serde_json::from_value(json!({
            "main": { "temp": 15.3, "feels_like": 14.1, "humidity": 72, "pressure": 1012 },
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "wind": { "speed": 4.6 },
            "name": name,
            "sys": { "country": "GB" }
        })) else {
            panic!("invalid stub payload");
        };
        Ok(payload)
    }

    async fn forecast(&self, _query: &LocationQuery) -> Result<ForecastPayload, GatewayError> {
        self.check()?;
        let list: Vec<Value> = (0..40_i64)
            .map(|i| {
                json!({
                    "dt": 1_700_000_000 + i * 10_800,
                    "main": { "temp": 10.0, "feels_like": 9.0, "humidity": 80, "pressure": 1005 },
                    "weather": [{ "description": "overcast clouds", "icon": "04d" }],
                    "wind": { "speed": 2.0 }
                })
            })
            .collect();
        let Ok(payload) = serde_json::from_value(json!({
            "list": list,
            "city": { "name": "London", "country": "GB" }
        })) else {
            panic!("invalid stub payload");
        };
        Ok(payload)
    }
}

#[derive(Debug)]
struct DownLedger;

#[async_trait]
impl SearchLedger for DownLedger {
    async fn record(&self, _: &str, _: f64, _: &str) -> Result<SearchRecord, GatewayError> {
        Err(GatewayError::StoreUnavailable("connection refused".into()))
    }
    async fn recent(&self, _: u32) -> Result<Vec<SearchRecord>, GatewayError> {
        Err(GatewayError::StoreUnavailable("connection refused".into()))
    }
    async fn ping(&self) -> Result<(), GatewayError> {
        Err(GatewayError::StoreUnavailable("connection refused".into()))
    }
    async fn purge_older_than(&self, _: DateTime<Utc>) -> Result<u64, GatewayError> {
        Err(GatewayError::StoreUnavailable("connection refused".into()))
    }
}

fn test_app(provider: Arc<StubProvider>, ledger: Arc<dyn SearchLedger>) -> Router {
    let (history, _handle) = HistoryWriter::spawn(Arc::clone(&ledger), 64);
    let weather_service = Arc::new(WeatherService::new(provider, history));
    build_router().with_state(AppState {
        weather_service,
        ledger,
    })
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
        panic!("bad request");
    };
    let Ok(response) = app.clone().oneshot(request).await;
    let status = response.status();
    let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
        panic!("body read failed");
    };
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn wait_for_records(ledger: &MemoryLedger, expected: usize) {
    for _ in 0..200 {
        if ledger.len().await >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("history writer did not record {expected} searches");
}

#[tokio::test]
async fn current_weather_matches_provider() {
    let app = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));

    let (status, body) = get(&app, "/api/weather?city=London").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "city": "London",
            "country": "GB",
            "temperature": 15.3,
            "feels_like": 14.1,
            "humidity": 72,
            "pressure": 1012,
            "description": "light rain",
            "icon": "10d",
            "wind_speed": 4.6
        })
    );
}

#[tokio::test]
async fn path_form_matches_query_form() {
    let app = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));

    let (_, by_query) = get(&app, "/api/weather?city=London").await;
    let (status, by_path) = get(&app, "/api/weather/London").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_query, by_path);
}

#[tokio::test]
async fn coordinates_are_accepted() {
    let app = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));

    let (status, body) = get(&app, "/api/weather?lat=51.48&lon=0.0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Greenwich");
}

#[tokio::test]
async fn missing_location_is_rejected_without_provider_call() {
    let provider = Arc::new(StubProvider::default());
    let app = test_app(Arc::clone(&provider), Arc::new(MemoryLedger::new()));

    for uri in ["/api/weather", "/api/weather?city=", "/api/forecast?lat=51.5", "/api/overview"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], "Please provide city or coordinates", "{uri}");
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let provider = Arc::new(StubProvider::default());
    let app = test_app(Arc::clone(&provider), Arc::new(MemoryLedger::new()));

    let (status, _) = get(&app, "/api/weather?lat=91&lon=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&app, "/api/weather?lat=north&lon=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_city_is_404_with_details() {
    let app = test_app(
        Arc::new(StubProvider::failing(404, "city not found")),
        Arc::new(MemoryLedger::new()),
    );

    for uri in ["/api/weather?city=Atlantis", "/api/forecast?city=Atlantis"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(
            body,
            json!({ "error": "City not found", "details": "city not found" })
        );
    }
}

#[tokio::test]
async fn provider_failures_are_500() {
    let app = test_app(
        Arc::new(StubProvider::failing(503, "overloaded")),
        Arc::new(MemoryLedger::new()),
    );
    let (status, body) = get(&app, "/api/weather?city=London").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch weather data");

    let app = test_app(
        Arc::new(StubProvider::failing(401, "Invalid API key")),
        Arc::new(MemoryLedger::new()),
    );
    let (status, body) = get(&app, "/api/weather?city=London").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Invalid API key");
}

#[tokio::test]
async fn forecast_has_at_most_five_ordered_days() {
    let app = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));

    let (status, body) = get(&app, "/api/forecast?city=London").await;
    assert_eq!(status, StatusCode::OK);
    let Some(days) = body.as_array() else {
        panic!("forecast is not an array");
    };
    assert_eq!(days.len(), 5);
    let dates: Vec<&str> = days.iter().filter_map(|d| d["date"].as_str()).collect();
    assert_eq!(dates.len(), 5);
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn overview_combines_both_lookups() {
    let provider = Arc::new(StubProvider::default());
    let app = test_app(Arc::clone(&provider), Arc::new(MemoryLedger::new()));

    let (status, body) = get(&app, "/api/overview?city=London").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["city"], "London");
    assert_eq!(body["forecast"].as_array().map(Vec::len), Some(5));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn display_overview_is_rounded_for_rendering() {
    let ledger = Arc::new(MemoryLedger::new());
    let app = test_app(
        Arc::new(StubProvider::default()),
        Arc::clone(&ledger) as Arc<dyn SearchLedger>,
    );

    let (status, body) = get(&app, "/api/display?city=London").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["location"], "London, GB");
    assert_eq!(body["current"]["temperature"], 15);
    assert_eq!(body["current"]["feels_like"], 14);
    assert_eq!(body["current"]["wind_speed"], "4.6");
    assert_eq!(body["current"]["theme"], "rain");
    assert_eq!(
        body["current"]["icon_url"],
        "https://openweathermap.org/img/wn/10d@2x.png"
    );
    assert_eq!(body["forecast"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["forecast"][0]["temperature"], 10);
    wait_for_records(&ledger, 1).await;
}

#[tokio::test]
async fn history_lists_searches_newest_first() {
    let ledger = Arc::new(MemoryLedger::new());
    let app = test_app(
        Arc::new(StubProvider::default()),
        Arc::clone(&ledger) as Arc<dyn SearchLedger>,
    );

    for (seen, city) in ["London", "Paris", "Berlin"].into_iter().enumerate() {
        let (status, _) = get(&app, &format!("/api/weather?city={city}")).await;
        assert_eq!(status, StatusCode::OK);
        wait_for_records(&ledger, seen + 1).await;
    }

    let (status, body) = get(&app, "/api/history").await;
    assert_eq!(status, StatusCode::OK);
    let cities: Vec<&str> = body
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["city"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(cities, ["Berlin", "Paris", "London"]);
    assert_eq!(body[0]["temperature"], 15.3);
    assert_eq!(body[0]["description"], "light rain");

    let (_, limited) = get(&app, "/api/history?limit=2").await;
    assert_eq!(limited.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn forecast_lookups_are_not_recorded() {
    let ledger = Arc::new(MemoryLedger::new());
    let app = test_app(
        Arc::new(StubProvider::default()),
        Arc::clone(&ledger) as Arc<dyn SearchLedger>,
    );

    let (status, _) = get(&app, "/api/forecast?city=London").await;
    assert_eq!(status, StatusCode::OK);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(ledger.is_empty().await);
}

#[tokio::test]
async fn malformed_location_query_is_json_400() {
    let provider = Arc::new(StubProvider::default());
    let app = test_app(Arc::clone(&provider), Arc::new(MemoryLedger::new()));

    for uri in [
        "/api/weather?city=London&city=Paris",
        "/api/forecast?city=London&city=Paris",
        "/api/overview?city=London&city=Paris",
        "/api/display?city=London&city=Paris",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let Some(message) = body["error"].as_str() else {
            panic!("{uri}: expected a JSON error body, got {body}");
        };
        assert!(message.contains("city"), "{uri}: {message}");
    }
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn malformed_history_limit_is_400() {
    let app = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));
    let (status, body) = get(&app, "/api/history?limit=ten").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn store_outage_fails_history_only() {
    let healthy = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));
    let degraded = test_app(Arc::new(StubProvider::default()), Arc::new(DownLedger));

    let (_, expected) = get(&healthy, "/api/weather?city=London").await;
    let (status, body) = get(&degraded, "/api/weather?city=London").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    let (status, body) = get(&degraded, "/api/history").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch search history" }));
}

#[tokio::test]
async fn health_reports_store_reachability() {
    let up = test_app(Arc::new(StubProvider::default()), Arc::new(MemoryLedger::new()));
    let (status, body) = get(&up, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"], "Connected");
    assert!(body["timestamp"].is_string());

    let down = test_app(Arc::new(StubProvider::default()), Arc::new(DownLedger));
    let (status, body) = get(&down, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "Disconnected");
}

#[tokio::test]
async fn slow_requests_time_out_with_408() {
    let app = Router::new()
        .route(
            "/slow",
            axum::routing::get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "done"
            }),
        )
        .layer(timeout_layer(Duration::from_millis(20)));

    let (status, _) = get(&app, "/slow").await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
