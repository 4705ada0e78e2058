//! OpenAPI document for the HTTP API.

use utoipa::OpenApi;

use super::error::{ErrorDetail, ValidationDetail};
use super::handlers::{self, DeleteResponse, HealthResponse, RootResponse};
use crate::error::FieldError;
use crate::store::{Item, ItemStats, ItemUpdate, NewItem};

/// OpenAPI description served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item Store Service",
        version = "1.0.0",
        description = "CRUD over an in-memory item catalog"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::list_items,
        handlers::get_item,
        handlers::create_item,
        handlers::update_item,
        handlers::delete_item,
        handlers::stats,
    ),
    components(schemas(
        Item,
        NewItem,
        ItemUpdate,
        ItemStats,
        RootResponse,
        HealthResponse,
        DeleteResponse,
        ErrorDetail,
        ValidationDetail,
        FieldError,
    )),
    tags(
        (name = "service", description = "Service metadata and health"),
        (name = "items", description = "Item CRUD and statistics")
    )
)]
pub struct ApiDoc;

/// Render the OpenAPI document as pretty-printed JSON.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
