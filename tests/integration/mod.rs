//! Integration tests for the item store HTTP API.
//!
//! Each test builds a fresh router over a freshly seeded store and drives it
//! in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use item_store::api::{create_router, AppState};
use item_store::store::ItemStore;

/// Router plus a handle on its state, so tests can issue several requests.
struct TestApp {
    state: AppState,
}

impl TestApp {
    fn seeded() -> Self {
        Self {
            state: AppState::new(ItemStore::new(), "test"),
        }
    }

    fn empty() -> Self {
        Self {
            state: AppState::new(ItemStore::empty(), "test"),
        }
    }

    fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("infallible router");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

fn mouse() -> Value {
    json!({
        "name": "Mouse",
        "description": "Wireless mouse",
        "price": 25.99,
        "category": "Electronics"
    })
}

#[tokio::test]
async fn test_root_reports_environment() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn test_list_items_returns_seed_collection() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/items").await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["name"], "Laptop");
}

#[tokio::test]
async fn test_get_item_by_id() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/items/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Laptop");
    assert_eq!(body["price"], 999.99);
}

#[tokio::test]
async fn test_create_then_get_round_trips_fields() {
    let app = TestApp::seeded();
    let (status, created) = app.post("/items", mouse()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 4);

    let (status, fetched) = app.get("/items/4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched,
        json!({
            "id": 4,
            "name": "Mouse",
            "description": "Wireless mouse",
            "price": 25.99,
            "category": "Electronics"
        })
    );
}

#[tokio::test]
async fn test_create_ignores_client_id() {
    let app = TestApp::seeded();
    let mut payload = mouse();
    payload["id"] = json!(100);

    let (status, created) = app.post("/items", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], 4);
}

#[tokio::test]
async fn test_ids_use_max_plus_one_after_delete() {
    let app = TestApp::seeded();

    let (_, first) = app.post("/items", mouse()).await;
    assert_eq!(first["id"], 4);

    let (status, _) = app.delete("/items/1").await;
    assert_eq!(status, StatusCode::OK);

    let (_, second) = app.post("/items", mouse()).await;
    assert_eq!(second["id"], 5);
}

#[tokio::test]
async fn test_create_in_empty_store_starts_at_one() {
    let app = TestApp::empty();
    let (_, created) = app.post("/items", mouse()).await;
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn test_update_preserves_unspecified_fields() {
    let app = TestApp::seeded();
    let (status, body) = app
        .put("/items/1", json!({"name": "Gaming Laptop", "price": 1299.99}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gaming Laptop");
    assert_eq!(body["price"], 1299.99);
    assert_eq!(body["category"], "Electronics");
    assert_eq!(body["description"], "High-performance laptop");

    let (_, fetched) = app.get("/items/1").await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn test_update_missing_item_returns_404() {
    let app = TestApp::seeded();
    let (status, body) = app.put("/items/999", json!({"name": "Test"})).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found");
}

#[tokio::test]
async fn test_update_with_bad_price_is_rejected_and_unapplied() {
    let app = TestApp::seeded();
    let (status, body) = app
        .put("/items/2", json!({"name": "Renamed", "price": "lots"}))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "price"]));

    let (_, fetched) = app.get("/items/2").await;
    assert_eq!(fetched["name"], "Book");
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let app = TestApp::seeded();
    let (status, body) = app.delete("/items/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Item deleted successfully"}));

    let (status, body) = app.get("/items/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn test_unsupported_method_returns_json_405() {
    let app = TestApp::seeded();
    let (status, body) = app.request(Method::PATCH, "/items/1", Some(json!({"name": "X"}))).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"detail": "Method Not Allowed"}));

    let (_, fetched) = app.get("/items/1").await;
    assert_eq!(fetched["name"], "Laptop");
}

#[tokio::test]
async fn test_undecodable_id_returns_422() {
    let app = TestApp::seeded();
    let (status, body) = app.delete("/items/%FF").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "int_parsing");
}

#[tokio::test]
async fn test_delete_missing_item_returns_404() {
    let app = TestApp::seeded();
    let (status, body) = app.delete("/items/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Item not found");
}

#[tokio::test]
async fn test_stats_over_seed_items() {
    let app = TestApp::seeded();
    let (status, body) = app.get("/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_items"], 3);
    assert_eq!(body["categories"].as_array().map(Vec::len), Some(3));

    let average = body["average_price"].as_f64().expect("number");
    let expected = (999.99 + 29.99 + 15.99) / 3.0;
    assert!((average - expected).abs() < 1e-9);
}

#[tokio::test]
async fn test_stats_total_tracks_list_length() {
    let app = TestApp::seeded();
    app.post("/items", mouse()).await;
    app.delete("/items/2").await;

    let (_, items) = app.get("/items").await;
    let (_, stats) = app.get("/stats").await;

    let len = items.as_array().map(Vec::len).expect("array");
    assert_eq!(stats["total_items"], json!(len));
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let app = TestApp::empty();
    let (status, body) = app.get("/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"total_items": 0, "categories": [], "average_price": 0.0})
    );
}

#[tokio::test]
async fn test_create_validation_leaves_collection_unchanged() {
    let app = TestApp::seeded();

    let (status, body) = app
        .post("/items", json!({"description": "Test item", "price": 10.99}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["body", "name"]));
    assert_eq!(body["detail"][0]["type"], "missing");

    let (status, body) = app
        .post(
            "/items",
            json!({"name": "Test Item", "price": "invalid_price", "category": "Test"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "float_parsing");

    let (_, items) = app.get("/items").await;
    assert_eq!(items.as_array().map(Vec::len), Some(3));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let app = TestApp::seeded();

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let router = app.router();
            tokio::spawn(async move {
                let request = Request::builder()
                    .method(Method::POST)
                    .uri("/items")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(mouse().to_string()))
                    .expect("valid request");
                router.oneshot(request).await.expect("infallible router").status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.expect("task completes"), StatusCode::OK);
    }

    let (_, items) = app.get("/items").await;
    let mut ids: Vec<i64> = items
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item["id"].as_i64())
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, (1..=13).collect::<Vec<_>>());
}
