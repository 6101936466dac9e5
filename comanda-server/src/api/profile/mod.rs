//! Profile API 模块
//!
//! 公开读取 + 管理员菜单管理。注意 `/menu/{category_id}` 的 GET 把路径段
//! 当作 profile id 使用 (公开菜单读取)，PUT/DELETE 把它当作 category id —
//! 与原有线上路径保持一致。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/profile", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list_public)
                .post(handler::upsert)
                .delete(handler::delete_own),
        )
        .route("/me", get(handler::me))
        .route("/register", post(handler::register_worker))
        .route("/user/{profile_id}", get(handler::get_by_id))
        .route("/menu/category", post(handler::add_category))
        .route(
            "/menu/{category_id}",
            get(handler::get_menu)
                .put(handler::update_category)
                .delete(handler::delete_category),
        )
        .route("/menu/{category_id}/dish", post(handler::add_dish))
        .route(
            "/menu/{category_id}/{dish_id}",
            put(handler::update_dish).delete(handler::delete_dish),
        )
        .route(
            "/menu/{category_id}/{dish_id}/change",
            post(handler::add_change),
        )
        .route(
            "/menu/{category_id}/{dish_id}/{change_id}",
            put(handler::update_change).delete(handler::delete_change),
        )
}
