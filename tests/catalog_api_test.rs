mod common;

use axum::http::{Method, StatusCode};
use common::{product_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn product_lifecycle() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::POST, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["name"], json!(""));
    assert_eq!(body["data"]["amount"], json!(0.0));
    assert_eq!(body["data"]["measureByWeight"], json!(false));

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v1/products/{}", id),
            Some(product_body(999, "Espresso beans", "0123456789012", 4.0)),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    // The id in the path wins over the body.
    assert_eq!(body["data"]["id"].as_i64(), Some(id));
    assert_eq!(body["data"]["name"], json!("Espresso beans"));
    assert_eq!(body["data"]["costPrice"], json!("1.50"));

    let (status, body) = app
        .call(Method::GET, &format!("/api/v1/products/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["upc"], json!("0123456789012"));
    assert_eq!(body["data"]["case_size"], json!(12));

    let (status, body) = app.call(Method::GET, "/api/v1/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/v1/products/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .call(Method::GET, &format!("/api/v1/products/{}", id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn saved_prices_and_quantities_read_back_exactly() {
    let app = TestApp::new().await;
    let id = app.create("/api/v1/products").await;

    let mut record = product_body(id, "Saffron", "", 57414.518664216484);
    record["costPrice"] = json!("12345678901234.56789");
    record["sellingPrice"] = json!("0.10");
    record["buyLevel"] = json!(0.1 + 0.2);
    let (status, body) = app
        .call(Method::PUT, &format!("/api/v1/products/{}", id), Some(record))
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (_, body) = app
        .call(Method::GET, &format!("/api/v1/products/{}", id), None)
        .await;
    assert_eq!(body["data"]["costPrice"], json!("12345678901234.56789"));
    assert_eq!(body["data"]["sellingPrice"], json!("0.10"));
    assert_eq!(body["data"]["amount"].as_f64(), Some(57414.518664216484));
    assert_eq!(body["data"]["buyLevel"].as_f64(), Some(0.1 + 0.2));
}

#[tokio::test]
async fn saving_a_duplicate_upc_conflicts() {
    let app = TestApp::new().await;
    app.seed_product("Oat milk", "4006381333931", 0.0).await;
    let other = app.create("/api/v1/products").await;

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/v1/products/{}", other),
            Some(product_body(other, "Soy milk", "4006381333931", 0.0)),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Empty codes never collide.
    let third = app.create("/api/v1/products").await;
    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/v1/products/{}", third),
            Some(product_body(third, "Loose tea", "", 0.0)),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn negative_stock_is_rejected() {
    let app = TestApp::new().await;
    let id = app.create("/api/v1/products").await;

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/v1/products/{}", id),
            Some(product_body(id, "Flour", "", -1.0)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_records_return_not_found() {
    let app = TestApp::new().await;

    for uri in [
        "/api/v1/products/41",
        "/api/v1/brands/41",
        "/api/v1/categories/41",
        "/api/v1/suppliers/41",
        "/api/v1/orders/pending/41",
        "/api/v1/orders/received/41",
    ] {
        let (status, _) = app.call(Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        let (status, _) = app.call(Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
    }
}

#[tokio::test]
async fn list_endpoints_page_by_id() {
    let app = TestApp::new().await;
    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(app.create("/api/v1/brands").await);
    }

    let (status, body) = app
        .call(Method::GET, "/api/v1/brands?limit=2&offset=1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let page: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();
    assert_eq!(page, ids[1..3].to_vec());
}

#[tokio::test]
async fn status_and_health_answer() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/api/v1/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], json!("stockroom"));
    assert_eq!(body["data"]["database"], json!("healthy"));

    let (status, _) = app.call(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.call(Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ready"));

    let (status, body) = app.call(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/products"].is_object());
}

#[tokio::test]
async fn responses_echo_the_request_id() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/v1/status", None).await;
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = common::response_json(response).await;
    assert!(header.is_some());
    assert_eq!(body["meta"]["request_id"].as_str(), header.as_deref());
}
