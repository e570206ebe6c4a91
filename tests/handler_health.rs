mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use order_reconciler::api::handlers::health_handler;

fn app() -> Router {
    // Health never calls upstream, so the base URLs only need to parse.
    let state = common::create_test_state("http://127.0.0.1:9", "http://127.0.0.1:9");

    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = TestServer::new(app()).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["merchize"]["status"], "ok");
    assert_eq!(json["checks"]["dreamship"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = TestServer::new(app()).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["checks"].get("merchize").is_some());
    assert!(json["checks"].get("dreamship").is_some());
}
