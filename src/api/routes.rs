//! HTTP API route definitions.

use axum::{middleware::map_response, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::ApiDoc;
use super::handlers::{
    create_item, delete_item, get_item, health, json_method_not_allowed, list_items, not_found,
    render_metrics, root, stats, update_item, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service endpoints
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        // Item endpoints
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/stats", get(stats))
        .fallback(not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(map_response(json_method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
