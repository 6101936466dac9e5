//! Orders API 模块
//!
//! 下单是公开接口 (顾客扫码无需登录)；查看与编辑订单需要餐厅身份。

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/order", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/me", get(handler::my_orders))
        .route("/{id}", put(handler::update))
        .route("/{id}/{table_number}", post(handler::create))
}
