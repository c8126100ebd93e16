//! Employment Contract API Module
//!
//! Contracts are created and listed under their employee; point lookups
//! use the flat path.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Contract router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/employees/{employee_id}/contracts",
            get(handler::list_for_employee).post(handler::create),
        )
        .route("/api/contracts/{id}", get(handler::get_by_id))
}
