//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use utoipa::ToSchema;

use super::error::{ApiError, ErrorDetail, ValidationDetail};
use crate::metrics::{self, RequestTimer};
use super::extract::ItemId;
use crate::store::validation::parse_body;
use crate::store::{
    validate_new_item, validate_update, Item, ItemStats, ItemStore, ItemUpdate, NewItem,
    DELETE_MESSAGE,
};

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "Item Store Service";

/// Fixed timestamp reported by the health probe.
pub const HEALTH_TIMESTAMP: &str = "2025-01-01T00:00:00Z";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The item collection. Every read or mutation holds this lock for its full duration.
    pub store: Arc<RwLock<ItemStore>>,
    /// Deployment label surfaced by the root endpoint.
    pub environment: Arc<str>,
    /// Prometheus handle, present when a recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state around a store.
    pub fn new(store: ItemStore, environment: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            environment: environment.into(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Restore the seed items.
    pub async fn reset_store(&self) {
        self.store.write().await.reset();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ItemStore::new(), "development")
    }
}

/// Root endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Service name.
    pub message: String,
    /// Always "healthy".
    pub status: String,
    /// Service version.
    pub version: String,
    /// Deployment label.
    pub environment: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: String,
    /// Fixed timestamp.
    pub timestamp: String,
}

/// Delete confirmation.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Confirmation message.
    pub message: String,
}

/// Service metadata.
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service metadata", body = RootResponse))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let _timer = RequestTimer::new("root");
    Json(RootResponse {
        message: SERVICE_NAME.to_string(),
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.environment.to_string(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    let _timer = RequestTimer::new("health");
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: HEALTH_TIMESTAMP.to_string(),
    })
}

/// List all items.
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses((status = 200, description = "All items", body = Vec<Item>))
)]
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    let _timer = RequestTimer::new("list_items");
    Json(state.store.read().await.list().to_vec())
}

/// Get a single item.
#[utoipa::path(
    get,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = Item),
        (status = 404, description = "No such item", body = ErrorDetail),
        (status = 422, description = "Invalid id", body = ValidationDetail)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<Item>, ApiError> {
    let _timer = RequestTimer::new("get_item");
    let store = state.store.read().await;
    Ok(Json(store.get(id)?.clone()))
}

/// Create an item. The id is assigned by the store.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = NewItem,
    responses(
        (status = 200, description = "The created item", body = Item),
        (status = 422, description = "Invalid payload", body = ValidationDetail)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Item>, ApiError> {
    let _timer = RequestTimer::new("create_item");
    let new_item = validate_new_item(&parse_body(&body)?)?;

    let item = state.store.write().await.create(new_item);
    metrics::inc_items_created();
    info!(id = item.id, name = %item.name, "Created item");

    Ok(Json(item))
}

/// Apply a partial update to an item.
#[utoipa::path(
    put,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    request_body = ItemUpdate,
    responses(
        (status = 200, description = "The updated item", body = Item),
        (status = 404, description = "No such item", body = ErrorDetail),
        (status = 422, description = "Invalid id or payload", body = ValidationDetail)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    body: Bytes,
) -> Result<Json<Item>, ApiError> {
    let _timer = RequestTimer::new("update_item");
    let update = validate_update(&parse_body(&body)?)?;

    let item = state.store.write().await.update(id, update)?;
    metrics::inc_items_updated();
    info!(id, "Updated item");

    Ok(Json(item))
}

/// Delete an item.
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    tag = "items",
    params(("item_id" = i64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Item removed", body = DeleteResponse),
        (status = 404, description = "No such item", body = ErrorDetail),
        (status = 422, description = "Invalid id", body = ValidationDetail)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let _timer = RequestTimer::new("delete_item");

    state.store.write().await.delete(id)?;
    metrics::inc_items_deleted();
    info!(id, "Deleted item");

    Ok(Json(DeleteResponse {
        message: DELETE_MESSAGE.to_string(),
    }))
}

/// Aggregate statistics over the collection.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "items",
    responses((status = 200, description = "Collection statistics", body = ItemStats))
)]
pub async fn stats(State(state): State<AppState>) -> Json<ItemStats> {
    let _timer = RequestTimer::new("stats");
    Json(state.store.read().await.stats())
}

/// Prometheus exposition, 503 when no recorder is installed.
pub async fn render_metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorDetail {
                detail: "Metrics recorder not installed".to_string(),
            }),
        )
            .into_response(),
    }
}

/// Replace axum's empty 405 with a JSON detail, keeping the `Allow` header.
pub async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
