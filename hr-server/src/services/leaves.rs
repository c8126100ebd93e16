//! Leave Lifecycle Service (请假生命周期)
//!
//! State machine: Draft → Submitted → Approved → Completed, with
//! Rejected / Cancelled reachable from Submitted. Only drafts accept
//! edits; only the monitoring sweep completes approved leaves. Every
//! guard (range, contract containment, approved-leave overlap) is
//! re-checked inside the transaction that applies the transition.

use std::sync::Arc;

use shared::events::LeaveStatusChange;
use shared::models::{
    LeaveCreate, LeaveRequest, LeaveRequestStatus, LeaveUpdate, LeaveWithEmployee,
};
use sqlx::SqlitePool;

use crate::db::repository::{contract, employee, leave_request};
use crate::notify::NotificationPublisher;

use super::error::{DomainError, DomainResult, Entity};

/// Longest accepted reason text
const MAX_REASON_LEN: usize = 500;

#[derive(Clone)]
pub struct LeaveService {
    pool: SqlitePool,
    publisher: Arc<dyn NotificationPublisher>,
}

impl LeaveService {
    pub fn new(pool: SqlitePool, publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { pool, publisher }
    }

    /// Create a leave request in Draft status.
    ///
    /// The full range must sit inside one active contract span of the
    /// employee.
    pub async fn create_draft(&self, data: LeaveCreate) -> DomainResult<LeaveWithEmployee> {
        validate_reason(data.reason.as_deref())?;

        let mut tx = self.pool.begin().await?;

        if !employee::exists(&mut *tx, data.employee_id).await? {
            return Err(DomainError::NotFound {
                entity: Entity::Employee,
                id: data.employee_id,
            });
        }

        if data.end_date < data.start_date {
            return Err(DomainError::InvalidRange);
        }

        if !contract::has_active_containing(
            &mut *tx,
            data.employee_id,
            data.start_date,
            data.end_date,
        )
        .await?
        {
            return Err(DomainError::NoValidContract);
        }

        let id = leave_request::insert(&mut *tx, &data).await?;
        tx.commit().await?;

        self.detail(id).await
    }

    /// Edit a draft. Re-validates the merged dates against the contract
    /// guard, exactly as creation does.
    pub async fn update_draft(&self, id: i64, data: LeaveUpdate) -> DomainResult<LeaveWithEmployee> {
        validate_reason(data.reason.as_deref())?;

        let mut tx = self.pool.begin().await?;

        let mut leave = self.load(&mut tx, id).await?;
        if leave.status != LeaveRequestStatus::Draft {
            return Err(invalid_transition(&leave, "Draft", "edited"));
        }

        // Merge provided fields, then re-run the guards
        if let Some(leave_type) = data.leave_type {
            leave.leave_type = leave_type;
        }
        if let Some(start_date) = data.start_date {
            leave.start_date = start_date;
        }
        if let Some(end_date) = data.end_date {
            leave.end_date = end_date;
        }
        if let Some(reason) = data.reason {
            leave.reason = Some(reason);
        }

        if leave.end_date < leave.start_date {
            return Err(DomainError::InvalidRange);
        }

        if !contract::has_active_containing(
            &mut *tx,
            leave.employee_id,
            leave.start_date,
            leave.end_date,
        )
        .await?
        {
            return Err(DomainError::NoValidContract);
        }

        leave_request::update_fields(&mut *tx, &leave).await?;
        tx.commit().await?;

        self.detail(id).await
    }

    /// Draft → Submitted
    pub async fn submit(&self, id: i64) -> DomainResult<LeaveWithEmployee> {
        let mut tx = self.pool.begin().await?;

        let leave = self.load(&mut tx, id).await?;
        if leave.status != LeaveRequestStatus::Draft {
            return Err(invalid_transition(&leave, "Draft", "submitted"));
        }

        leave_request::set_status(&mut *tx, id, LeaveRequestStatus::Submitted, None).await?;
        tx.commit().await?;

        self.detail(id).await
    }

    /// Submitted → Approved. Guarded against overlap with any other
    /// approved leave of the same employee (inclusive bounds).
    pub async fn approve(&self, id: i64, approver_name: &str) -> DomainResult<LeaveWithEmployee> {
        let approver = validate_approver(approver_name)?;

        let mut tx = self.pool.begin().await?;

        let leave = self.load(&mut tx, id).await?;
        if leave.status != LeaveRequestStatus::Submitted {
            return Err(invalid_transition(&leave, "Submitted", "approved"));
        }

        if leave_request::has_overlapping_approved(
            &mut *tx,
            leave.employee_id,
            leave.start_date,
            leave.end_date,
            Some(id),
        )
        .await?
        {
            return Err(DomainError::LeaveOverlap);
        }

        leave_request::set_status(&mut *tx, id, LeaveRequestStatus::Approved, Some(approver))
            .await?;
        tx.commit().await?;

        let detail = self.detail(id).await?;
        self.publish_status_change(&detail, format!("Leave request approved by {approver}"))
            .await;
        Ok(detail)
    }

    /// Submitted → Rejected
    pub async fn reject(&self, id: i64, approver_name: &str) -> DomainResult<LeaveWithEmployee> {
        let approver = validate_approver(approver_name)?;

        let mut tx = self.pool.begin().await?;

        let leave = self.load(&mut tx, id).await?;
        if leave.status != LeaveRequestStatus::Submitted {
            return Err(invalid_transition(&leave, "Submitted", "rejected"));
        }

        leave_request::set_status(&mut *tx, id, LeaveRequestStatus::Rejected, Some(approver))
            .await?;
        tx.commit().await?;

        let detail = self.detail(id).await?;
        self.publish_status_change(&detail, format!("Leave request rejected by {approver}"))
            .await;
        Ok(detail)
    }

    /// Submitted → Cancelled
    pub async fn cancel(&self, id: i64) -> DomainResult<LeaveWithEmployee> {
        let mut tx = self.pool.begin().await?;

        let leave = self.load(&mut tx, id).await?;
        if leave.status != LeaveRequestStatus::Submitted {
            return Err(invalid_transition(&leave, "Submitted", "cancelled"));
        }

        leave_request::set_status(&mut *tx, id, LeaveRequestStatus::Cancelled, None).await?;
        tx.commit().await?;

        let detail = self.detail(id).await?;
        self.publish_status_change(&detail, "Leave request has been cancelled".to_string())
            .await;
        Ok(detail)
    }

    /// Complete every approved leave whose end date has passed.
    ///
    /// Invoked by the monitoring loop; commits as one batch and notifies
    /// only after the commit. Returns how many leaves were completed.
    pub async fn complete_expired_leaves(&self) -> DomainResult<usize> {
        let today = shared::util::today_utc();
        let mut tx = self.pool.begin().await?;

        let expired = leave_request::list_expired_approved(&mut *tx, today).await?;
        if expired.is_empty() {
            return Ok(0);
        }

        for row in &expired {
            leave_request::set_status(&mut *tx, row.id, LeaveRequestStatus::Completed, None)
                .await?;
        }

        tx.commit().await?;

        for row in &expired {
            self.publisher
                .leave_updated(LeaveStatusChange {
                    leave_request_id: row.id,
                    employee_id: row.employee_id,
                    employee_name: row.employee_name.clone(),
                    status: LeaveRequestStatus::Completed.as_str().to_string(),
                    leave_type: Some(row.leave_type),
                    start_date: Some(row.start_date),
                    end_date: Some(row.end_date),
                    message: "Leave request has been completed".to_string(),
                })
                .await;
        }

        tracing::info!(count = expired.len(), "Completed finished leaves");
        Ok(expired.len())
    }

    pub async fn get_leave(&self, id: i64) -> DomainResult<LeaveWithEmployee> {
        self.detail(id).await
    }

    /// All leave requests of one employee, newest first
    pub async fn leaves_for_employee(&self, employee_id: i64) -> DomainResult<Vec<LeaveWithEmployee>> {
        if !employee::exists(&self.pool, employee_id).await? {
            return Err(DomainError::NotFound {
                entity: Entity::Employee,
                id: employee_id,
            });
        }
        Ok(leave_request::list_for_employee(&self.pool, employee_id).await?)
    }

    async fn load(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        id: i64,
    ) -> DomainResult<LeaveRequest> {
        leave_request::find_by_id(&mut **tx, id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: Entity::LeaveRequest,
                id,
            })
    }

    async fn detail(&self, id: i64) -> DomainResult<LeaveWithEmployee> {
        leave_request::find_detail(&self.pool, id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: Entity::LeaveRequest,
                id,
            })
    }

    async fn publish_status_change(&self, detail: &LeaveWithEmployee, message: String) {
        self.publisher
            .leave_updated(LeaveStatusChange {
                leave_request_id: detail.id,
                employee_id: detail.employee_id,
                employee_name: detail.employee_name.clone(),
                status: detail.status.as_str().to_string(),
                leave_type: None,
                start_date: None,
                end_date: None,
                message,
            })
            .await;
    }
}

fn invalid_transition(leave: &LeaveRequest, required: &'static str, action: &'static str) -> DomainError {
    DomainError::InvalidTransition {
        required,
        action,
        current: leave.status.as_str().to_string(),
    }
}

fn validate_reason(reason: Option<&str>) -> DomainResult<()> {
    if let Some(reason) = reason {
        if reason.len() > MAX_REASON_LEN {
            return Err(DomainError::Validation(format!(
                "Reason must be at most {MAX_REASON_LEN} characters"
            )));
        }
    }
    Ok(())
}

fn validate_approver(name: &str) -> DomainResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > 100 {
        return Err(DomainError::Validation(
            "Approver name must be 1-100 characters".into(),
        ));
    }
    Ok(trimmed)
}
