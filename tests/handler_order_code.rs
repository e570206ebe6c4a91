mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use common::{FakeDreamship, FakeMerchize, Outage, dreamship_order, merchize_order};
use order_reconciler::api::handlers::{dreamship_order_code_handler, merchize_order_code_handler};
use serde_json::{Value, json};

async fn server(merchize: FakeMerchize, dreamship: FakeDreamship) -> TestServer {
    let state = common::start(merchize, dreamship).await;
    let app = Router::new()
        .route("/api/merchize/order-code", post(merchize_order_code_handler))
        .route("/api/dreamship/order-code", post(dreamship_order_code_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn merchize_fixture() -> FakeMerchize {
    FakeMerchize {
        orders: vec![
            merchize_order("o1", "RK-32344-92365", "MYSHOP-0001", "processing"),
            merchize_order("o2", "RK-11111-22222", "MYSHOP-0002", " completed "),
        ],
        ..FakeMerchize::default()
    }
}

#[tokio::test]
async fn test_merchize_order_codes_in_input_order() {
    let server = server(merchize_fixture(), FakeDreamship::default()).await;

    let response = server
        .post("/api/merchize/order-code")
        .json(&json!({
            "orders": [
                { "input": "MYSHOP-0001", "external_number": "MYSHOP-0001" },
                { "input": "MYSHOP-0002", "external_number": "MYSHOP-0002", "identifier": "" },
                { "input": "MYSHOP-9999", "external_number": "MYSHOP-9999" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["input"], "MYSHOP-0001");
    assert_eq!(results[0]["code"], "RK-32344-92365");
    assert_eq!(results[0]["status"], "processing");

    assert_eq!(results[1]["code"], "RK-11111-22222");
    assert_eq!(results[1]["status"], "completed");

    assert_eq!(results[2]["success"], false);
    assert_eq!(results[2]["error"], "no corresponding order found");
    assert_eq!(results[2]["code"], Value::Null);
}

#[tokio::test]
async fn test_missing_identifier_keeps_row_count() {
    let merchize = merchize_fixture();
    let hits = merchize.hits.clone();
    let server = server(merchize, FakeDreamship::default()).await;

    let response = server
        .post("/api/merchize/order-code")
        .json(&json!({
            "orders": [
                { "input": "" },
                { "input": "MYSHOP-0001", "external_number": "MYSHOP-0001" }
            ]
        }))
        .await;

    let json = response.json::<Value>();
    let results = json["results"].as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["success"], false);
    assert_eq!(results[0]["error"], "missing external_number");
    assert_eq!(results[1]["code"], "RK-32344-92365");
    assert_eq!(hits.get(), 1);
}

#[tokio::test]
async fn test_empty_orders_makes_no_call() {
    let merchize = merchize_fixture();
    let hits = merchize.hits.clone();
    let server = server(merchize, FakeDreamship::default()).await;

    let response = server
        .post("/api/merchize/order-code")
        .json(&json!({ "orders": [] }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "success": true, "results": [] }));
    assert_eq!(hits.get(), 0);
}

#[tokio::test]
async fn test_merchize_outage_fails_every_row() {
    let merchize = FakeMerchize {
        outage: Some(Outage::new(502, "bad gateway")),
        ..merchize_fixture()
    };
    let server = server(merchize, FakeDreamship::default()).await;

    let response = server
        .post("/api/merchize/order-code")
        .json(&json!({
            "orders": [
                { "input": "MYSHOP-0001", "external_number": "MYSHOP-0001" },
                { "input": "MYSHOP-0002", "external_number": "MYSHOP-0002" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["success"], false);

    for row in json["results"].as_array().unwrap() {
        assert_eq!(row["success"], false);
        assert_eq!(row["error"], "Merchize API error: 502 bad gateway");
    }
}

#[tokio::test]
async fn test_dreamship_order_code_by_reference() {
    let dreamship = FakeDreamship {
        orders: vec![
            dreamship_order(322265507, "ETSY-42", "in_production", None),
            dreamship_order(322265600, "1001", "shipped", None),
        ],
        ..FakeDreamship::default()
    };
    let server = server(FakeMerchize::default(), dreamship).await;

    let response = server
        .post("/api/dreamship/order-code")
        .json(&json!({
            "orders": [
                { "input": "ETSY-42", "reference_id": "ETSY-42" },
                { "input": "ETSY-43", "reference_id": "ETSY-43" },
                { "input": "" },
                { "input": "1001", "reference_id": 1001 }
            ]
        }))
        .await;

    let json = response.json::<Value>();
    assert_eq!(json["success"], true);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["code"], "322265507");
    assert_eq!(results[0]["status"], "in_production");
    assert_eq!(results[1]["error"], "no corresponding order found");
    assert_eq!(results[2]["error"], "missing reference_id");
    assert_eq!(results[3]["code"], "322265600");
}

#[tokio::test]
async fn test_merchize_code_returned_verbatim() {
    let merchize = FakeMerchize {
        orders: vec![merchize_order("o9", " RK-55555-66666-F2 ", "MYSHOP-0009", "processing")],
        ..FakeMerchize::default()
    };
    let server = server(merchize, FakeDreamship::default()).await;

    let response = server
        .post("/api/merchize/order-code")
        .json(&json!({
            "orders": [{ "input": "MYSHOP-0009", "external_number": "MYSHOP-0009" }]
        }))
        .await;

    assert_eq!(response.json::<Value>()["results"][0]["code"], "RK-55555-66666-F2");
}

#[tokio::test]
async fn test_too_many_orders_rejected() {
    let server = server(FakeMerchize::default(), FakeDreamship::default()).await;
    let orders: Vec<Value> = (0..1001)
        .map(|i| json!({ "input": format!("N{i}"), "reference_id": format!("N{i}") }))
        .collect();

    let response = server
        .post("/api/dreamship/order-code")
        .json(&json!({ "orders": orders }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Validation failed");
}

#[tokio::test]
async fn test_malformed_body_is_internal_error() {
    let server = server(FakeMerchize::default(), FakeDreamship::default()).await;

    let response = server
        .post("/api/merchize/order-code")
        .content_type("application/json")
        .bytes("{\"orders\": [".into())
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["success"], false);
}
