//! In-memory item collection.

use std::collections::HashSet;

use tracing::debug;

use crate::error::StoreError;

use super::types::{seed_items, Item, ItemStats, ItemUpdate, NewItem};

/// Confirmation message returned after a successful delete.
pub const DELETE_MESSAGE: &str = "Item deleted successfully";

/// Ordered in-memory item collection.
///
/// The store does no locking of its own; callers share it behind a lock
/// (see [`crate::api::AppState`]) so each operation runs to completion before
/// the next one starts.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Create a store holding the seed items.
    pub fn new() -> Self {
        Self {
            items: seed_items(),
        }
    }

    /// Create a store with no items.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Restore the seed collection.
    pub fn reset(&mut self) {
        self.items = seed_items();
        debug!("Store reset to seed items");
    }

    /// All items in collection order.
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by id.
    pub fn get(&self, id: i64) -> Result<&Item, StoreError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    /// Append a new item and return it.
    ///
    /// The id is one more than the current maximum, so ids freed by deleting
    /// the highest item are handed out again.
    pub fn create(&mut self, new_item: NewItem) -> Item {
        let item = new_item.into_item(self.next_id());
        debug!(id = item.id, name = %item.name, "Item created");
        self.items.push(item.clone());
        item
    }

    /// Apply a partial update to an existing item and return the result.
    pub fn update(&mut self, id: i64, update: ItemUpdate) -> Result<Item, StoreError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound { id })?;

        update.apply_to(item);
        debug!(id, "Item updated");
        Ok(item.clone())
    }

    /// Remove an item, returning it.
    pub fn delete(&mut self, id: i64) -> Result<Item, StoreError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound { id })?;

        let removed = self.items.remove(index);
        debug!(id, "Item deleted");
        Ok(removed)
    }

    /// Count, distinct categories, and mean price.
    pub fn stats(&self) -> ItemStats {
        let categories: HashSet<&str> = self
            .items
            .iter()
            .map(|item| item.category.as_str())
            .collect();

        let average_price = if self.items.is_empty() {
            0.0
        } else {
            self.items.iter().map(|item| item.price).sum::<f64>() / self.items.len() as f64
        };

        ItemStats {
            total_items: self.items.len(),
            categories: categories.into_iter().map(str::to_string).collect(),
            average_price,
        }
    }

    fn next_id(&self) -> i64 {
        self.items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
    }
}
