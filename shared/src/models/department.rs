//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    pub name: String,
    /// Managing employee, if assigned
    pub manager_id: Option<i64>,
}

/// Department with manager name and headcount (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentWithStats {
    pub id: i64,
    pub name: String,
    pub manager_id: Option<i64>,
    pub manager_name: Option<String>,
    pub employee_count: i64,
}

/// Create / replace department payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCreate {
    pub name: String,
    pub manager_id: Option<i64>,
}
