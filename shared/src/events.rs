//! Notification hub events (实时通知事件)
//!
//! Typed payloads broadcast to every connected admin console over the
//! WebSocket hub. Field names serialize as camelCase — the wire contract
//! the console already speaks. Event names are stable identifiers; the
//! payload rides under `data`:
//!
//! ```json
//! { "event": "ContractUpdated", "data": { "contractId": 7, ... } }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{EmploymentType, LeaveType};

/// Contract status change (created as active, or ended)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractUpdate {
    pub contract_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    /// "Active" or "Ended"
    pub status: String,
    pub end_date: Option<NaiveDate>,
    pub message: String,
}

/// Early warning for a contract nearing its end date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractExpiry {
    pub contract_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub end_date: NaiveDate,
    pub days_until_expiry: i64,
    pub employment_type: EmploymentType,
    pub base_salary: f64,
}

/// Leave request status change (approved / rejected / cancelled / completed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveStatusChange {
    pub leave_request_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<LeaveType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub message: String,
}

/// Early warning for an approved leave about to start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveReminder {
    pub leave_request_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_until_start: i64,
    pub reason: Option<String>,
}

/// Employee record change (CRUD and status actions)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeChange {
    pub employee_id: i64,
    pub employee_name: String,
    pub change_type: String,
    pub message: String,
}

/// One event on the hub, tagged by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum HubEvent {
    ContractUpdated(ContractUpdate),
    ContractExpiringSoon(ContractExpiry),
    LeaveRequestUpdated(LeaveStatusChange),
    UpcomingLeave(LeaveReminder),
    EmployeeUpdated(EmployeeChange),
}

impl HubEvent {
    /// Stable event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContractUpdated(_) => "ContractUpdated",
            Self::ContractExpiringSoon(_) => "ContractExpiringSoon",
            Self::LeaveRequestUpdated(_) => "LeaveRequestUpdated",
            Self::UpcomingLeave(_) => "UpcomingLeave",
            Self::EmployeeUpdated(_) => "EmployeeUpdated",
        }
    }
}
