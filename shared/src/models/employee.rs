//! Employee Model (员工档案)

use serde::{Deserialize, Serialize};

/// Employee status
///
/// Not freely settable through the API: contract and leave transitions
/// drive it, plus the explicit set-active / set-on-leave actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Inactive,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    /// Unique across all employees
    pub email: String,
    pub phone: Option<String>,
    /// Reference into the external image store; plain text here
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub status: EmployeeStatus,
    /// 创建时间 (Unix timestamp millis)
    pub created_at: i64,
    pub department_id: Option<i64>,
    pub position_id: Option<i64>,
}

/// Employee with department / position names (for list and detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmployeeWithRefs {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub status: EmployeeStatus,
    pub created_at: i64,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub position_id: Option<i64>,
    pub position_title: Option<String>,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub department_id: Option<i64>,
    pub position_id: Option<i64>,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub department_id: Option<i64>,
    pub position_id: Option<i64>,
}
