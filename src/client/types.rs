//! Type definitions for the Mealie household shopping API.
//!
//! Mealie serialises its models as camelCase JSON. Nested objects this crate
//! never inspects (foods, units, labels, recipes) are kept as raw
//! [`serde_json::Value`] so server-side additions don't break decoding.
//!
//! ## Key Types
//!
//! - [`ShoppingListOut`] - A list with its items, recipe references and label settings
//! - [`ShoppingListItemOut`] - A single line on a list
//! - [`ShoppingListItemsCollectionOut`] - What the bulk item endpoints answer with
//! - [`PaginationData`] - Standard wrapper for collection reads

use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_quantity() -> f64 {
    1.0
}

/// Paged collection returned by every `list` call.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationData<T> {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// Generic acknowledgement returned by delete-style actions.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
    #[serde(default)]
    pub error: bool,
}

// Shopping lists

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListUpdate {
    pub id: String,
    pub group_id: String,
    pub user_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(default)]
    pub list_items: Vec<ShoppingListItemOut>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListOut {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub household_id: Option<String>,
    #[serde(default)]
    pub extras: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub list_items: Vec<ShoppingListItemOut>,
    #[serde(default)]
    pub recipe_references: Vec<ShoppingListRecipeRefOut>,
    #[serde(default)]
    pub label_settings: Vec<ShoppingListMultiPurposeLabelOut>,
}

/// A recipe contributing ingredients to a list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListRecipeRefOut {
    pub id: String,
    pub shopping_list_id: String,
    pub recipe_id: String,
    #[serde(default = "default_quantity")]
    pub recipe_quantity: f64,
    #[serde(default)]
    pub recipe: Option<Value>,
}

/// One entry of the body posted to the add-recipe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListAddRecipeParamsBulk {
    pub recipe_id: String,
    #[serde(default = "default_quantity")]
    pub recipe_increment_quantity: f64,
    /// Explicit ingredients to add instead of the recipe's own list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_ingredients: Option<Vec<Value>>,
}

impl ShoppingListAddRecipeParamsBulk {
    pub fn new(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            recipe_increment_quantity: default_quantity(),
            recipe_ingredients: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListRemoveRecipeParams {
    #[serde(default = "default_quantity")]
    pub recipe_decrement_quantity: f64,
}

impl Default for ShoppingListRemoveRecipeParams {
    fn default() -> Self {
        Self {
            recipe_decrement_quantity: default_quantity(),
        }
    }
}

/// Per-list placement of a multi-purpose label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListMultiPurposeLabelUpdate {
    pub id: String,
    pub shopping_list_id: String,
    pub label_id: String,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListMultiPurposeLabelOut {
    pub id: String,
    pub shopping_list_id: String,
    pub label_id: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub label: Option<Value>,
}

// Shopping list items

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemCreate {
    pub shopping_list_id: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(default)]
    pub recipe_references: Vec<Value>,
}

impl ShoppingListItemCreate {
    /// A free-text item with quantity 1.
    pub fn note(shopping_list_id: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            shopping_list_id: shopping_list_id.into(),
            checked: false,
            position: 0,
            quantity: default_quantity(),
            note: note.into(),
            food_id: None,
            unit_id: None,
            label_id: None,
            extras: None,
            recipe_references: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemOut {
    pub id: String,
    pub shopping_list_id: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub note: Option<String>,
    /// Human readable rendering computed by the server.
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub food_id: Option<String>,
    #[serde(default)]
    pub unit_id: Option<String>,
    #[serde(default)]
    pub label_id: Option<String>,
    #[serde(default)]
    pub food: Option<Value>,
    #[serde(default)]
    pub unit: Option<Value>,
    #[serde(default)]
    pub label: Option<Value>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub household_id: Option<String>,
    #[serde(default)]
    pub extras: Option<Value>,
    #[serde(default)]
    pub recipe_references: Vec<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// An existing item as sent to the bulk update endpoint; `id` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemUpdateBulk {
    pub id: String,
    pub shopping_list_id: String,
    pub checked: bool,
    pub position: i32,
    pub quantity: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Value>,
    #[serde(default)]
    pub recipe_references: Vec<Value>,
}

impl From<ShoppingListItemOut> for ShoppingListItemUpdateBulk {
    fn from(item: ShoppingListItemOut) -> Self {
        Self {
            id: item.id,
            shopping_list_id: item.shopping_list_id,
            checked: item.checked,
            position: item.position,
            quantity: item.quantity,
            note: item.note,
            food_id: item.food_id,
            unit_id: item.unit_id,
            label_id: item.label_id,
            extras: item.extras,
            recipe_references: item.recipe_references,
        }
    }
}

/// Answer of the bulk create/update endpoints.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItemsCollectionOut {
    #[serde(default)]
    pub created_items: Vec<ShoppingListItemOut>,
    #[serde(default)]
    pub updated_items: Vec<ShoppingListItemOut>,
    #[serde(default)]
    pub deleted_items: Vec<ShoppingListItemOut>,
}

/// Anything that can be addressed by id in a bulk delete.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for ShoppingListItemOut {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ShoppingListItemUpdateBulk {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for String {
    fn id(&self) -> &str {
        self
    }
}

impl Identified for &str {
    fn id(&self) -> &str {
        self
    }
}
