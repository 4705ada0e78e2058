//! Item data model, payload validation, and the in-memory store.

pub mod memory;
pub mod types;
pub mod validation;

pub use memory::{ItemStore, DELETE_MESSAGE};
pub use types::{seed_items, Item, ItemStats, ItemUpdate, NewItem};
pub use validation::{validate_new_item, validate_update};
