//! Order Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Order, OrderItem};

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_id(TABLE, id);
        let order: Option<Order> = self.base.db().select(thing).await?;
        Ok(order)
    }

    /// All orders for one restaurant, newest first
    pub async fn find_for_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<Order>> {
        let restaurant = restaurant_id.to_string();
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE restaurant = $restaurant ORDER BY created_at DESC")
            .bind(("restaurant", restaurant))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Replace the item list and its recomputed total
    pub async fn replace_items(
        &self,
        id: &str,
        items: Vec<OrderItem>,
        total_price: f64,
    ) -> RepoResult<Order> {
        let thing = parse_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    items = $items,
                    total_price = $total_price
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("items", items))
            .bind(("total_price", total_price))
            .await?;
        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
