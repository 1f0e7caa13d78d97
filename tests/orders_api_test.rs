mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

async fn pending_order(app: &TestApp, product: i64, amount: f64) -> i64 {
    let (status, body) = app
        .call(
            Method::POST,
            "/api/v1/orders/pending",
            Some(json!({ "product_id": product })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["amount"], json!(0.0));
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/v1/orders/pending/{}", id),
            Some(json!({"id": id, "product": product, "amount": amount})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    id
}

#[tokio::test]
async fn receiving_moves_stock_onto_the_product() {
    let app = TestApp::new().await;
    let rice = app.seed_product("Basmati rice", "888", 3.0).await;
    let pending = pending_order(&app, rice, 10.0).await;

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/v1/orders/pending/{}/product", pending),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], json!("Basmati rice"));

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/v1/orders/pending/{}/receive", pending),
            Some(json!({"date": "03/07/2024", "actually_received": 8.0, "damaged": 2.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let received = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["received"], json!("03/07/2024"));
    assert_eq!(body["data"]["gross_amount"], json!(10.0));
    assert_eq!(body["data"]["product_id"], json!(rice));

    let (_, body) = app
        .call(Method::GET, &format!("/api/v1/products/{}", rice), None)
        .await;
    assert_eq!(body["data"]["amount"], json!(11.0));

    let (status, _) = app
        .call(Method::GET, &format!("/api/v1/orders/pending/{}", pending), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.call(Method::GET, "/api/v1/orders/received", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .call(
            Method::GET,
            &format!("/api/v1/orders/received/{}/product", received),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(rice));
}

#[tokio::test]
async fn over_receiving_is_rejected_without_side_effects() {
    let app = TestApp::new().await;
    let salt = app.seed_product("Sea salt", "999", 1.0).await;
    let pending = pending_order(&app, salt, 5.0).await;

    let (status, _) = app
        .call(
            Method::POST,
            &format!("/api/v1/orders/pending/{}/receive", pending),
            Some(json!({"actually_received": 5.0, "damaged": 1.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            Method::POST,
            &format!("/api/v1/orders/pending/{}/receive", pending),
            Some(json!({"actually_received": -1.0, "damaged": 0.0})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(Method::GET, &format!("/api/v1/orders/pending/{}", pending), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], json!(5.0));

    let (_, body) = app
        .call(Method::GET, &format!("/api/v1/products/{}", salt), None)
        .await;
    assert_eq!(body["data"]["amount"], json!(1.0));

    let (_, body) = app.call(Method::GET, "/api/v1/orders/received", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn receiving_without_a_date_stamps_today() {
    let app = TestApp::new().await;
    let yeast = app.seed_product("Dry yeast", "", 0.0).await;
    let pending = pending_order(&app, yeast, 2.0).await;

    let (status, body) = app
        .call(
            Method::POST,
            &format!("/api/v1/orders/pending/{}/receive", pending),
            Some(json!({"actually_received": 2.0, "damaged": 0.0})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let today = chrono::Utc::now().date_naive().format("%m/%d/%Y").to_string();
    assert_eq!(body["data"]["received"], json!(today));
}

#[tokio::test]
async fn received_orders_can_be_corrected_and_removed() {
    let app = TestApp::new().await;
    let honey = app.seed_product("Honey", "", 0.0).await;
    let pending = pending_order(&app, honey, 6.0).await;
    let (_, body) = app
        .call(
            Method::POST,
            &format!("/api/v1/orders/pending/{}/receive", pending),
            Some(json!({"date": "01/15/2024", "actually_received": 6.0, "damaged": 0.0})),
        )
        .await;
    let received = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/orders/received/{}", received);

    let (status, body) = app
        .call(
            Method::PUT,
            &uri,
            Some(json!({
                "id": received,
                "received": "01/16/2024",
                "product_id": honey,
                "gross_amount": 6.0,
                "actually_received": 5.0,
                "damaged": 1.0
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["received"], json!("01/16/2024"));

    let (status, _) = app
        .call(
            Method::PUT,
            &uri,
            Some(json!({
                "id": received,
                "received": null,
                "product_id": honey,
                "gross_amount": 6.0,
                "actually_received": 6.0,
                "damaged": 1.0
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.call(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.call(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pending_orders_need_an_existing_product() {
    let app = TestApp::new().await;

    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/orders/pending",
            Some(json!({ "product_id": 404 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/orders/pending",
            Some(json!({ "product_id": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
