//! Item data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A sellable product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Store-assigned unique id.
    pub id: i64,
    /// Product name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Product category.
    pub category: String,
}

/// Validated input for creating an item. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewItem {
    /// Product name, non-empty.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: f64,
    /// Product category, non-empty.
    pub category: String,
}

impl NewItem {
    /// Attach an id, producing a stored item.
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
        }
    }
}

/// Partial update. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemUpdate {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New price.
    #[serde(default)]
    pub price: Option<f64>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
}

impl ItemUpdate {
    /// Apply present fields to `item` in order: name, description, price, category.
    pub fn apply_to(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
    }
}

/// Aggregate statistics over the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemStats {
    /// Number of items.
    pub total_items: usize,
    /// Distinct categories, unordered.
    pub categories: Vec<String>,
    /// Mean price, 0 when the collection is empty.
    pub average_price: f64,
}

/// The items every fresh store starts with.
pub fn seed_items() -> Vec<Item> {
    vec![
        Item {
            id: 1,
            name: "Laptop".to_string(),
            description: Some("High-performance laptop".to_string()),
            price: 999.99,
            category: "Electronics".to_string(),
        },
        Item {
            id: 2,
            name: "Book".to_string(),
            description: Some("Programming book".to_string()),
            price: 29.99,
            category: "Education".to_string(),
        },
        Item {
            id: 3,
            name: "Coffee".to_string(),
            description: Some("Premium coffee beans".to_string()),
            price: 15.99,
            category: "Food".to_string(),
        },
    ]
}
