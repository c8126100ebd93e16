//! Leave Request API Module
//!
//! Drafts are created and listed under their employee; everything else —
//! edits and lifecycle actions — addresses the leave request directly.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Leave request router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees/{employee_id}/leave-requests",
            get(handler::list_for_employee).post(handler::create),
        )
        .route(
            "/api/leave-requests/{id}",
            get(handler::get_by_id).put(handler::update),
        )
        .route("/api/leave-requests/{id}/submit", post(handler::submit))
        .route("/api/leave-requests/{id}/approve", post(handler::approve))
        .route("/api/leave-requests/{id}/reject", post(handler::reject))
        .route("/api/leave-requests/{id}/cancel", post(handler::cancel))
}
