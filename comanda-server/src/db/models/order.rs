//! Order Model
//!
//! Orders snapshot dish and change names/prices at submission time; later
//! menu edits never change an existing order. `total_price` is derived by
//! the pricing engine and always tip-exclusive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Order ID type
pub type OrderId = RecordId;

/// Order entity matching the `orders` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing,
        deserialize_with = "serde_helpers::option_record_id::deserialize"
    )]
    pub id: Option<OrderId>,
    /// Restaurant (profile) this order was placed against
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant: RecordId,
    pub table_number: i64,
    pub created_at: DateTime<Utc>,
    /// false = open, true = closed
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub tip: f64,
    /// Derived, tip-exclusive
    pub total_price: f64,
}

/// One ordered dish, with price snapshots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub dish_name: String,
    pub dish_price: f64,
    #[serde(default)]
    pub change_list: Vec<OrderChange>,
}

/// Snapshot of one selected change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderChange {
    pub change_name: String,
    #[serde(default)]
    pub change_price: f64,
}

/// Place-order payload (restaurant and table come from the path)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, message = "Items are required"))]
    pub items: Vec<OrderItem>,
    #[validate(range(min = 0.0, max = 1_000_000.0, message = "Tip must be a non-negative number"))]
    pub tip: f64,
}

/// Edit-order payload: replaces the item list, total is recomputed
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderUpdate {
    #[validate(length(min = 1, message = "Items are required"))]
    pub items: Vec<OrderItem>,
}
