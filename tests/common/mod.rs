#![allow(dead_code)]

//! In-process fake Merchize and Dreamship APIs.
//!
//! Each fake is an axum router bound to `127.0.0.1:0`; tests point the real
//! provider clients at it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use order_reconciler::application::services::ProviderSet;
use order_reconciler::infrastructure::providers::{
    DreamshipClient, DreamshipSettings, MerchizeClient, MerchizeSettings, build_http_client,
};
use order_reconciler::state::AppState;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Upstream failure a fake answers every request with.
#[derive(Clone)]
pub struct Outage {
    pub status: StatusCode,
    pub body: String,
}

impl Outage {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }
}

/// Request counter shared with the test.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn inc(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

fn base_code(code: &str) -> &str {
    let code = code.trim();
    match code.rsplit_once('-') {
        Some((base, suffix)) if suffix.starts_with(['F', 'f']) => base,
        _ => code,
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value[key].as_str().unwrap_or_default()
}

// ============ Merchize ============

/// Fixture data served by the fake Merchize API.
#[derive(Clone, Default)]
pub struct FakeMerchize {
    /// Orders of `list-orders-detail` and `search/v3`.
    pub orders: Vec<Value>,
    /// Packages of `list-orders-tracking`.
    pub packages: Vec<Value>,
    /// Shipment events keyed by fulfillment id.
    pub history: HashMap<String, Vec<Value>>,
    pub outage: Option<Outage>,
    /// Fails shipment-status calls only.
    pub history_outage: Option<Outage>,
    pub hits: Hits,
}

#[derive(Deserialize)]
struct MerchizeBody {
    orders: Vec<Value>,
}

#[derive(Deserialize)]
struct CodeQuery {
    code: String,
}

fn merchize_ok(data: Value) -> Response {
    Json(json!({ "success": true, "data": data })).into_response()
}

fn outage_response(outage: &Outage) -> Response {
    (outage.status, outage.body.clone()).into_response()
}

async fn merchize_detail(State(fake): State<Arc<FakeMerchize>>, Json(body): Json<MerchizeBody>) -> Response {
    fake.hits.inc();
    if let Some(outage) = &fake.outage {
        return outage_response(outage);
    }

    let mut found: Vec<Value> = fake
        .orders
        .iter()
        .filter(|order| {
            body.orders.iter().any(|wanted| {
                let number = str_field(wanted, "external_number");
                let code = str_field(wanted, "code");
                (!number.is_empty() && str_field(order, "external_number") == number)
                    || (!code.is_empty() && base_code(str_field(order, "code")) == code)
            })
        })
        .cloned()
        .collect();

    // Upstream order is unrelated to request order.
    found.reverse();
    merchize_ok(Value::Array(found))
}

async fn merchize_tracking(State(fake): State<Arc<FakeMerchize>>, Json(body): Json<MerchizeBody>) -> Response {
    fake.hits.inc();
    if let Some(outage) = &fake.outage {
        return outage_response(outage);
    }

    let mut found: Vec<Value> = fake
        .packages
        .iter()
        .filter(|package| {
            body.orders.iter().any(|wanted| {
                let number = str_field(wanted, "external_number");
                let code = str_field(wanted, "code");
                (!number.is_empty() && str_field(package, "external_number") == number)
                    || (!code.is_empty() && base_code(str_field(package, "name")) == code)
            })
        })
        .cloned()
        .collect();

    found.reverse();
    merchize_ok(Value::Array(found))
}

async fn merchize_search(State(fake): State<Arc<FakeMerchize>>, Query(query): Query<CodeQuery>) -> Response {
    fake.hits.inc();
    if let Some(outage) = &fake.outage {
        return outage_response(outage);
    }

    let found: Vec<Value> = fake
        .orders
        .iter()
        .filter(|order| str_field(order, "code").starts_with(query.code.trim()))
        .cloned()
        .collect();

    merchize_ok(json!({ "orders": found, "total": found.len() }))
}

async fn merchize_shipment_status(
    State(fake): State<Arc<FakeMerchize>>,
    Path((_order_id, fulfillment_id)): Path<(String, String)>,
) -> Response {
    fake.hits.inc();
    if let Some(outage) = fake.history_outage.as_ref().or(fake.outage.as_ref()) {
        return outage_response(outage);
    }

    let events = fake.history.get(&fulfillment_id).cloned().unwrap_or_default();
    merchize_ok(json!({ "history": events }))
}

impl FakeMerchize {
    /// Serves the fixtures and returns the base URL.
    pub async fn start(self) -> String {
        let router = Router::new()
            .route("/order/external/orders/list-orders-detail", post(merchize_detail))
            .route("/order/external/orders/list-orders-tracking", post(merchize_tracking))
            .route("/order/orders/search/v3", get(merchize_search))
            .route(
                "/order/orders/{order_id}/fulfillments/{fulfillment_id}/shipment-status",
                get(merchize_shipment_status),
            )
            .with_state(Arc::new(self));

        spawn(router).await
    }
}

pub fn merchize_order(id: &str, code: &str, external_number: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "code": code,
        "external_number": external_number,
        "order_status": status,
    })
}

pub fn merchize_package(id: &str, name: &str, external_number: &str, tracking: Option<(&str, &str)>) -> Value {
    let (number, company) = tracking.unwrap_or_default();
    let status = if tracking.is_some() { "shipped" } else { "pending" };

    json!({
        "_id": id,
        "name": name,
        "status": status,
        "external_number": external_number,
        "has_tracking": tracking.is_some(),
        "tracking_number": number,
        "tracking_company": company,
        "items": [],
    })
}

// ============ Dreamship ============

/// Fixture data served by the fake Dreamship API.
#[derive(Clone, Default)]
pub struct FakeDreamship {
    pub orders: Vec<Value>,
    pub outage: Option<Outage>,
    pub hits: Hits,
}

#[derive(Deserialize)]
struct ReferenceQuery {
    reference_id: String,
}

async fn dreamship_get_order(State(fake): State<Arc<FakeDreamship>>, Path(id): Path<String>) -> Response {
    fake.hits.inc();
    if let Some(outage) = &fake.outage {
        return outage_response(outage);
    }

    match fake.orders.iter().find(|o| o["id"].to_string() == id) {
        Some(order) => Json(order.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response(),
    }
}

async fn dreamship_list_orders(
    State(fake): State<Arc<FakeDreamship>>,
    Query(query): Query<ReferenceQuery>,
) -> Response {
    fake.hits.inc();
    if let Some(outage) = &fake.outage {
        return outage_response(outage);
    }

    let data: Vec<Value> = fake
        .orders
        .iter()
        .filter(|o| str_field(o, "reference_id") == query.reference_id)
        .cloned()
        .collect();

    Json(json!({ "data": data })).into_response()
}

impl FakeDreamship {
    pub async fn start(self) -> String {
        let router = Router::new()
            .route("/v1/orders/", get(dreamship_list_orders))
            .route("/v1/orders/{id}/", get(dreamship_get_order))
            .with_state(Arc::new(self));

        spawn(router).await
    }
}

pub fn dreamship_order(id: u64, reference_id: &str, status: &str, tracking: Option<(&str, &str, &str)>) -> Value {
    let trackings = match tracking {
        Some((number, carrier, created_at)) => json!([{
            "id": id * 10,
            "carrier": carrier,
            "tracking_number": number,
            "created_at": created_at,
            "status": "In transit",
        }]),
        None => json!([]),
    };

    json!({
        "id": id,
        "reference_id": reference_id,
        "status": status,
        "fulfillments": [{ "id": id + 1, "trackings": trackings }],
    })
}

// ============ State ============

/// Builds application state with real clients pointed at the fakes.
pub fn create_test_state(merchize_url: &str, dreamship_url: &str) -> AppState {
    AppState::new(create_test_providers(merchize_url, dreamship_url))
}

pub fn create_test_providers(merchize_url: &str, dreamship_url: &str) -> ProviderSet {
    let http = build_http_client(Duration::from_secs(2), Duration::from_secs(5)).unwrap();

    let merchize = MerchizeClient::new(
        http.clone(),
        &MerchizeSettings {
            base_url: merchize_url.to_string(),
            access_token: "merchize-test-token".to_string(),
            batch_size: 100,
        },
    )
    .unwrap();

    let dreamship = DreamshipClient::new(
        http,
        &DreamshipSettings {
            base_url: dreamship_url.to_string(),
            access_token: "dreamship-test-token".to_string(),
            concurrency: 4,
        },
    )
    .unwrap();

    ProviderSet::new(Arc::new(merchize), Arc::new(dreamship))
}

/// Starts both fakes and returns state wired to them.
pub async fn start(merchize: FakeMerchize, dreamship: FakeDreamship) -> AppState {
    let merchize_url = merchize.start().await;
    let dreamship_url = dreamship.start().await;

    create_test_state(&merchize_url, &dreamship_url)
}
