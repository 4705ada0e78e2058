//! HTTP API module for item CRUD, health, metrics, and OpenAPI endpoints.

pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use extract::ItemId;
pub use handlers::AppState;
pub use routes::create_router;
