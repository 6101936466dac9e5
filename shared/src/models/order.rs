//! Order Model (wire form)
//!
//! A customer's submitted selection against one restaurant and table.
//! Item names and prices are snapshots taken at order time; later menu
//! edits never change an existing order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Option<String>,
    /// Restaurant (profile) this order belongs to
    pub restaurant: String,
    pub table_number: i64,
    pub created_at: DateTime<Utc>,
    /// false = open, true = closed
    pub status: bool,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub tip: f64,
    /// Tip-exclusive total, computed server-side
    pub total_price: f64,
}

/// One ordered dish with its selected changes (all fields snapshots)
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
