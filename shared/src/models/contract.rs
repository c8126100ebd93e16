//! Employment Contract Model (雇佣合同)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

/// Contract status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ContractStatus {
    Active,
    Ended,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Ended => "Ended",
        }
    }
}

/// Employment contract entity
///
/// `end_date` is open-ended when unset; for overlap purposes the span is
/// the half-open interval `[start_date, end_date)` with a missing end
/// treated as unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct EmploymentContract {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub employment_type: EmploymentType,
    /// Monthly base salary; normalised to 2 decimal places
    pub base_salary: f64,
    pub status: ContractStatus,
}

/// Contract with its employee name (for API views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ContractWithEmployee {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub employment_type: EmploymentType,
    pub base_salary: f64,
    pub status: ContractStatus,
}

/// Contract joined with employee contact details, used by monitoring sweeps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ContractSweepRow {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub employment_type: EmploymentType,
    pub base_salary: f64,
    pub status: ContractStatus,
}

/// Create contract payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractCreate {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub employment_type: EmploymentType,
    pub base_salary: f64,
}
