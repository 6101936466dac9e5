//! Users API 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::register))
        .route("/password", post(handler::change_password))
        .route("/recover", post(handler::recover))
        .route("/reset/{code}", post(handler::reset_password))
}
