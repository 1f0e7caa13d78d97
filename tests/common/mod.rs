use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use stockroom::{config::AppConfig, db, events, AppState};
use tower::ServiceExt;

/// Helper harness for spinning up the full router backed by an in-memory SQLite database.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let (event_sender, event_rx) = events::channel(256);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let state = AppState::new(Arc::new(pool), cfg, event_sender);
        let router = stockroom::app(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Send a request against the router.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a request and returns the status with the decoded JSON body (`Null` when empty).
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        let status = response.status();
        (status, response_json(response).await)
    }

    /// Creates a record under `collection` (e.g. `/api/v1/brands`) and returns its id.
    #[allow(dead_code)]
    pub async fn create(&self, collection: &str) -> i64 {
        let (status, body) = self.call(Method::POST, collection, None).await;
        assert_eq!(status, StatusCode::CREATED, "create {} failed: {}", collection, body);
        body["data"]["id"].as_i64().expect("created record has an id")
    }

    /// Creates a product and saves it with the given name, UPC and stock.
    #[allow(dead_code)]
    pub async fn seed_product(&self, name: &str, upc: &str, amount: f64) -> i64 {
        let id = self.create("/api/v1/products").await;
        let (status, body) = self
            .call(
                Method::PUT,
                &format!("/api/v1/products/{}", id),
                Some(product_body(id, name, upc, amount)),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "seed product failed: {}", body);
        id
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Full product record as the API expects it on save.
#[allow(dead_code)]
pub fn product_body(id: i64, name: &str, upc: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "upc": upc,
        "description": "",
        "buyLevel": null,
        "costPrice": "1.50",
        "sellingPrice": "2.25",
        "amount": amount,
        "case_size": 12,
        "measureByWeight": false
    })
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is not json")
    }
}
