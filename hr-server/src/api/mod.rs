//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口
//! - [`departments`] - 部门管理接口
//! - [`positions`] - 岗位管理接口
//! - [`contracts`] - 雇佣合同接口
//! - [`leave_requests`] - 请假申请接口
//! - [`notifications`] - WebSocket 通知推送

pub mod contracts;
pub mod departments;
pub mod employees;
pub mod health;
pub mod leave_requests;
pub mod notifications;
pub mod positions;

use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the full application router with CORS and request tracing
pub fn router(state: ServerState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health::router())
        .merge(employees::router())
        .merge(departments::router())
        .merge(positions::router())
        .merge(contracts::router())
        .merge(leave_requests::router())
        .merge(notifications::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
