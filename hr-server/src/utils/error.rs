//! 统一错误处理
//!
//! Two layers of failure reach the HTTP boundary:
//!
//! - [`crate::services::DomainError`] — typed domain-rule violations,
//!   mapped to 4xx responses with stable machine codes
//! - infrastructure failures (storage, unexpected) — logged with full
//!   context and surfaced as a generic 500 without leaking internals
//!
//! Response body:
//!
//! ```json
//! { "code": "OVERLAPPING_CONTRACT", "message": "..." }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::db::repository::RepoError;
use crate::services::DomainError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain-rule violation raised by the lifecycle services (4xx)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 验证失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 资源冲突 (409)
    #[error("Resource conflict: {0}")]
    Conflict(String),

    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Domain(err) => {
                if matches!(err, DomainError::Persistence(_)) {
                    // 记录内部错误但不暴露详细信息
                    tracing::error!(error = %err, "Persistence failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        err.code(),
                        "An internal error occurred".to_string(),
                    )
                } else {
                    (err.status(), err.code(), err.to_string())
                }
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// 处理器的 Result 类型别名
pub type AppResult<T> = std::result::Result<T, AppError>;
