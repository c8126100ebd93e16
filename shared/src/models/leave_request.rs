//! Leave Request Model (请假申请)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Leave type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Maternity,
    Paternity,
    Unpaid,
}

/// Leave request lifecycle status
///
/// Draft → Submitted → Approved → Completed, with Rejected / Cancelled
/// reachable from Submitted. Rejected, Cancelled and Completed are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum LeaveRequestStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
    Cancelled,
    Completed,
}

impl LeaveRequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled | Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
        }
    }
}

/// Leave request entity
///
/// Dates form a closed interval `[start_date, end_date]`; both bounds are
/// inclusive when testing overlap against other approved leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveRequest {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveRequestStatus,
    pub approver_name: Option<String>,
}

/// Leave request with its employee name (for API views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveWithEmployee {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveRequestStatus,
    pub approver_name: Option<String>,
}

/// Leave joined with employee contact details, used by monitoring sweeps
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct LeaveSweepRow {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub status: LeaveRequestStatus,
}

/// Create leave draft payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveCreate {
    pub employee_id: i64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
}

/// Update leave draft payload — only drafts accept edits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveUpdate {
    pub leave_type: Option<LeaveType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

/// Approve / reject action payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalAction {
    pub approver_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_accept_no_further_actions() {
        for status in [
            LeaveRequestStatus::Rejected,
            LeaveRequestStatus::Cancelled,
            LeaveRequestStatus::Completed,
        ] {
            assert!(status.is_terminal());
        }
        for status in [
            LeaveRequestStatus::Draft,
            LeaveRequestStatus::Submitted,
            LeaveRequestStatus::Approved,
        ] {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn statuses_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&LeaveRequestStatus::Submitted).unwrap();
        assert_eq!(json, "\"SUBMITTED\"");
        let json = serde_json::to_string(&LeaveType::Paternity).unwrap();
        assert_eq!(json, "\"PATERNITY\"");
    }
}
