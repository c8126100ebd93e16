//! Employee API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        // 状态动作：员工状态只能通过这两个动作显式设置
        .route("/{id}/set-active", post(handler::set_active))
        .route("/{id}/set-on-leave", post(handler::set_on_leave))
}
