//! In-memory item catalog exposed over HTTP.
//!
//! The service keeps a single ordered collection of [`store::Item`] records
//! and exposes list, get, create, update, delete and statistics operations
//! over it, plus health and service-info endpoints.
//!
//! ```text
//! GET    /              service metadata
//! GET    /health        static health payload
//! GET    /items         all items
//! GET    /items/{id}    one item, 404 if absent
//! POST   /items         create, id = max(ids) + 1
//! PUT    /items/{id}    partial update
//! DELETE /items/{id}    remove
//! GET    /stats         count, categories, mean price
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Item model, validation, and the in-memory store
//! - [`api`]: HTTP router, handlers, and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
