//! Notification WebSocket API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Notification router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/notifications/ws", get(handler::ws))
}
