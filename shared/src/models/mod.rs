//! Data models
//!
//! Shared between hr-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod contract;
pub mod department;
pub mod employee;
pub mod leave_request;
pub mod position;

// Re-exports
pub use contract::*;
pub use department::*;
pub use employee::*;
pub use leave_request::*;
pub use position::*;
