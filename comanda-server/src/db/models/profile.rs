//! Profile Model
//!
//! A restaurant profile owned by one admin account. The menu is a nested
//! document (categories → dishes → changes) mutated as a whole: every
//! nested element carries a stable uuid used for addressing, new elements
//! are always prepended, and every lookup goes through a checked locate
//! helper instead of indexing blind.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use uuid::Uuid;
use validator::Validate;

use super::serde_helpers;

/// Profile ID type
pub type ProfileId = RecordId;

/// Restaurant profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(
        default,
        skip_serializing,
        deserialize_with = "serde_helpers::option_record_id::deserialize"
    )]
    pub id: Option<ProfileId>,
    /// Owning admin user
    #[serde(with = "serde_helpers::record_id")]
    pub owner: RecordId,
    pub restaurant_name: String,
    pub restaurant_desc: String,
    #[serde(default = "default_seller_payment_id")]
    pub seller_payment_id: String,
    /// Worker accounts registered by the owner
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub workers: Vec<RecordId>,
    /// Menu catalog, most recently added category first
    #[serde(default)]
    pub menu: Vec<Category>,
    /// Table identifiers for the dining room
    #[serde(default)]
    pub table_list: Vec<String>,
}

fn default_seller_payment_id() -> String {
    "paymentID".to_string()
}

/// Menu category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub category_name: String,
    pub category_desc: String,
    #[serde(default)]
    pub dish: Vec<Dish>,
}

/// Dish inside a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub dish_name: String,
    pub dish_desc: String,
    pub dish_price: f64,
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub change_list: Vec<Change>,
}

/// Dish modifier ("change")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub id: String,
    pub change_name: String,
    #[serde(default)]
    pub change_price: f64,
}

impl Profile {
    pub fn new(owner: RecordId, data: ProfileUpsert) -> Self {
        Self {
            id: None,
            owner,
            restaurant_name: data.restaurant_name,
            restaurant_desc: data.restaurant_desc,
            seller_payment_id: data
                .seller_payment_id
                .unwrap_or_else(default_seller_payment_id),
            workers: Vec::new(),
            menu: Vec::new(),
            table_list: data.table_list.unwrap_or_default(),
        }
    }

    /// Replace the scalar fields from an upsert payload (menu and workers
    /// are never touched here)
    pub fn apply_upsert(&mut self, data: ProfileUpsert) {
        self.restaurant_name = data.restaurant_name;
        self.restaurant_desc = data.restaurant_desc;
        if let Some(payment_id) = data.seller_payment_id {
            self.seller_payment_id = payment_id;
        }
        if let Some(table_list) = data.table_list {
            self.table_list = table_list;
        }
    }

    /// Locate a category by id
    pub fn category_mut(&mut self, category_id: &str) -> Option<&mut Category> {
        self.menu.iter_mut().find(|c| c.id == category_id)
    }

    /// Prepend a new category (most-recent-first ordering)
    pub fn prepend_category(&mut self, category: Category) {
        self.menu.insert(0, category);
    }

    /// Remove a category by id, returning it if present
    pub fn remove_category(&mut self, category_id: &str) -> Option<Category> {
        let index = self.menu.iter().position(|c| c.id == category_id)?;
        Some(self.menu.remove(index))
    }

    /// The menu with hidden dishes filtered out
    ///
    /// Public reads return the full menu (hidden dishes included) exactly
    /// as the stored document; display clients that want the customer view
    /// use this instead.
    pub fn visible_menu(&self) -> Vec<Category> {
        self.menu
            .iter()
            .map(|c| {
                let mut c = c.clone();
                c.dish.retain(|d| !d.hide);
                c
            })
            .collect()
    }
}

impl Category {
    pub fn new(data: CategoryCreate) -> Self {
        Self {
            id: new_node_id(),
            category_name: data.category_name,
            category_desc: data.category_desc,
            dish: Vec::new(),
        }
    }

    /// Locate a dish by id
    pub fn dish_mut(&mut self, dish_id: &str) -> Option<&mut Dish> {
        self.dish.iter_mut().find(|d| d.id == dish_id)
    }

    /// Prepend a new dish
    pub fn prepend_dish(&mut self, dish: Dish) {
        self.dish.insert(0, dish);
    }

    /// Remove a dish by id, returning it if present
    pub fn remove_dish(&mut self, dish_id: &str) -> Option<Dish> {
        let index = self.dish.iter().position(|d| d.id == dish_id)?;
        Some(self.dish.remove(index))
    }
}

impl Dish {
    pub fn new(data: DishCreate) -> Self {
        Self {
            id: new_node_id(),
            dish_name: data.dish_name,
            dish_desc: data.dish_desc,
            dish_price: data.dish_price,
            hide: data.hide.unwrap_or(false),
            change_list: Vec::new(),
        }
    }

    /// Locate a change by id
    pub fn change_mut(&mut self, change_id: &str) -> Option<&mut Change> {
        self.change_list.iter_mut().find(|c| c.id == change_id)
    }

    /// Prepend a new change
    pub fn prepend_change(&mut self, change: Change) {
        self.change_list.insert(0, change);
    }

    /// Remove a change by id, returning it if present
    pub fn remove_change(&mut self, change_id: &str) -> Option<Change> {
        let index = self.change_list.iter().position(|c| c.id == change_id)?;
        Some(self.change_list.remove(index))
    }
}

impl Change {
    pub fn new(data: ChangeCreate) -> Self {
        Self {
            id: new_node_id(),
            change_name: data.change_name,
            change_price: data.change_price.unwrap_or(0.0),
        }
    }
}

/// Fresh id for a nested menu element, unique within the document
fn new_node_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// =============================================================================
// Payloads
// =============================================================================

/// Create-or-update profile payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProfileUpsert {
    #[validate(length(min = 1, max = 200, message = "Restaurant name is required"))]
    pub restaurant_name: String,
    #[validate(length(min = 1, max = 500, message = "Restaurant description is required"))]
    pub restaurant_desc: String,
    pub seller_payment_id: Option<String>,
    pub table_list: Option<Vec<String>>,
}

/// Add category payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 200, message = "Category name is required"))]
    pub category_name: String,
    #[validate(length(min = 1, max = 500, message = "Category description is required"))]
    pub category_desc: String,
}

/// Edit category payload (full field replacement, as on the wire)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 200, message = "Category name is required"))]
    pub category_name: String,
    #[validate(length(min = 1, max = 500, message = "Category description is required"))]
    pub category_desc: String,
}

/// Add dish payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DishCreate {
    #[validate(length(min = 1, max = 200, message = "Dish name is required"))]
    pub dish_name: String,
    #[validate(length(min = 1, max = 500, message = "Dish description is required"))]
    pub dish_desc: String,
    #[validate(range(
        min = 0.0,
        max = 1_000_000.0,
        message = "Dish price must be a non-negative number"
    ))]
    pub dish_price: f64,
    pub hide: Option<bool>,
}

/// Edit dish payload (full field replacement; `hide` optional)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DishUpdate {
    #[validate(length(min = 1, max = 200, message = "Dish name is required"))]
    pub dish_name: String,
    #[validate(length(min = 1, max = 500, message = "Dish description is required"))]
    pub dish_desc: String,
    #[validate(range(
        min = 0.0,
        max = 1_000_000.0,
        message = "Dish price must be a non-negative number"
    ))]
    pub dish_price: f64,
    pub hide: Option<bool>,
}

/// Add change payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeCreate {
    #[validate(length(min = 1, max = 200, message = "Change name is required"))]
    pub change_name: String,
    /// May be negative (discount); defaults to 0
    #[validate(range(
        min = -1_000_000.0,
        max = 1_000_000.0,
        message = "Change price must be a number"
    ))]
    pub change_price: Option<f64>,
}

/// Edit change payload: omitted price leaves the stored price unchanged
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeUpdate {
    #[validate(length(min = 1, max = 200, message = "Change name is required"))]
    pub change_name: String,
    #[validate(range(
        min = -1_000_000.0,
        max = 1_000_000.0,
        message = "Change price must be a number"
    ))]
    pub change_price: Option<f64>,
}
