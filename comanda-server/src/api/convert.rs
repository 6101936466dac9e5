//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use surrealdb::RecordId;

use crate::db::models as db;
use shared::client::UserInfo;
use shared::models as api;

// ============ Helpers ============

pub fn record_id_to_string(id: &RecordId) -> String {
    id.to_string()
}

pub fn option_record_id_to_string(id: &Option<RecordId>) -> Option<String> {
    id.as_ref().map(record_id_to_string)
}

pub fn record_ids_to_strings(ids: &[RecordId]) -> Vec<String> {
    ids.iter().map(record_id_to_string).collect()
}

// ============ User ============

impl From<db::User> for UserInfo {
    fn from(u: db::User) -> Self {
        Self {
            id: option_record_id_to_string(&u.id).unwrap_or_default(),
            name: u.name,
            email: u.email,
            role: u.role,
            status: u.status.as_str().to_string(),
            avatar: u.avatar,
        }
    }
}

impl From<&db::User> for api::OwnerSummary {
    fn from(u: &db::User) -> Self {
        Self {
            name: u.name.clone(),
            avatar: u.avatar.clone(),
        }
    }
}

// ============ Profile / Menu ============

impl From<db::Profile> for api::Profile {
    fn from(p: db::Profile) -> Self {
        Self {
            id: option_record_id_to_string(&p.id),
            owner: record_id_to_string(&p.owner),
            owner_info: None,
            restaurant_name: p.restaurant_name,
            restaurant_desc: p.restaurant_desc,
            seller_payment_id: p.seller_payment_id,
            workers: record_ids_to_strings(&p.workers),
            menu: p.menu.into_iter().map(Into::into).collect(),
            table_list: p.table_list,
        }
    }
}

impl From<db::Category> for api::Category {
    fn from(c: db::Category) -> Self {
        Self {
            id: c.id,
            category_name: c.category_name,
            category_desc: c.category_desc,
            dish: c.dish.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<db::Dish> for api::Dish {
    fn from(d: db::Dish) -> Self {
        Self {
            id: d.id,
            dish_name: d.dish_name,
            dish_desc: d.dish_desc,
            dish_price: d.dish_price,
            hide: d.hide,
            change_list: d.change_list.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<db::Change> for api::Change {
    fn from(c: db::Change) -> Self {
        Self {
            id: c.id,
            change_name: c.change_name,
            change_price: c.change_price,
        }
    }
}

/// Attach the owner's public summary to a converted profile
pub fn profile_with_owner(profile: db::Profile, owner: Option<&db::User>) -> api::Profile {
    let mut converted: api::Profile = profile.into();
    converted.owner_info = owner.map(Into::into);
    converted
}

// ============ Order ============

impl From<db::Order> for api::Order {
    fn from(o: db::Order) -> Self {
        Self {
            id: option_record_id_to_string(&o.id),
            restaurant: record_id_to_string(&o.restaurant),
            table_number: o.table_number,
            created_at: o.created_at,
            status: o.status,
            items: o.items.into_iter().map(Into::into).collect(),
            tip: o.tip,
            total_price: o.total_price,
        }
    }
}

impl From<db::OrderItem> for api::OrderItem {
    fn from(i: db::OrderItem) -> Self {
        Self {
            dish_name: i.dish_name,
            dish_price: i.dish_price,
            change_list: i.change_list.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<db::OrderChange> for api::OrderChange {
    fn from(c: db::OrderChange) -> Self {
        Self {
            change_name: c.change_name,
            change_price: c.change_price,
        }
    }
}
