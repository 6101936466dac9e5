//! Profile Model (wire form)
//!
//! The restaurant profile as served to clients: string ids, nested menu
//! included. One profile per admin account.

use serde::{Deserialize, Serialize};

/// Owner info surfaced on public profile reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub name: String,
    pub avatar: Option<String>,
}

/// Restaurant profile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Option<String>,
    /// Owning admin user id
    pub owner: String,
    /// Owner name/avatar (populated on public reads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_info: Option<OwnerSummary>,
    pub restaurant_name: String,
    pub restaurant_desc: String,
    pub seller_payment_id: String,
    /// Worker user ids registered to this restaurant
    #[serde(default)]
    pub workers: Vec<String>,
    /// Menu catalog, most recently added category first
    #[serde(default)]
    pub menu: Vec<Category>,
    /// Table identifiers printed on the in-house QR cards
    #[serde(default)]
    pub table_list: Vec<String>,
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
    /// Hidden dishes stay in the payload; display clients filter them
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub change_list: Vec<Change>,
}

/// Dish modifier ("change"): extra shot, no onions, discount, ...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub id: String,
    pub change_name: String,
    /// May be zero or negative (discount)
    #[serde(default)]
    pub change_price: f64,
}
