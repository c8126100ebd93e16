//! Position Model (岗位)

use serde::{Deserialize, Serialize};

/// Position entity — a role within one department
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Position {
    pub id: i64,
    pub title: String,
    pub department_id: i64,
}

/// Position with department name and headcount (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PositionWithStats {
    pub id: i64,
    pub title: String,
    pub department_id: i64,
    pub department_name: String,
    pub employee_count: i64,
}

/// Create / replace position payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionCreate {
    pub title: String,
    pub department_id: i64,
}
