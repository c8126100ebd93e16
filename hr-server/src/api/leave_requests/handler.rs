//! Leave Request API Handlers
//!
//! Thin layer over [`LeaveService`]; the state machine guards live in the
//! service.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{ApprovalAction, LeaveCreate, LeaveUpdate, LeaveWithEmployee};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// All leave requests of one employee, newest first
pub async fn list_for_employee(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
) -> AppResult<Json<Vec<LeaveWithEmployee>>> {
    let leaves = state.leaves.leaves_for_employee(employee_id).await?;
    Ok(Json(leaves))
}

/// Get leave request by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LeaveWithEmployee>> {
    let leave = state.leaves.get_leave(id).await?;
    Ok(Json(leave))
}

/// Create a leave draft for the employee in the path
pub async fn create(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Json(payload): Json<LeaveCreate>,
) -> AppResult<Json<LeaveWithEmployee>> {
    if payload.employee_id != employee_id {
        return Err(AppError::Validation(
            "EmployeeId mismatch between route and body".into(),
        ));
    }

    let leave = state.leaves.create_draft(payload).await?;
    Ok(Json(leave))
}

/// Edit a draft
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<LeaveUpdate>,
) -> AppResult<Json<LeaveWithEmployee>> {
    let leave = state.leaves.update_draft(id, payload).await?;
    Ok(Json(leave))
}

/// Draft → Submitted
pub async fn submit(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LeaveWithEmployee>> {
    let leave = state.leaves.submit(id).await?;
    Ok(Json(leave))
}

/// Submitted → Approved
pub async fn approve(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(action): Json<ApprovalAction>,
) -> AppResult<Json<LeaveWithEmployee>> {
    let leave = state.leaves.approve(id, &action.approver_name).await?;
    Ok(Json(leave))
}

/// Submitted → Rejected
pub async fn reject(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(action): Json<ApprovalAction>,
) -> AppResult<Json<LeaveWithEmployee>> {
    let leave = state.leaves.reject(id, &action.approver_name).await?;
    Ok(Json(leave))
}

/// Submitted → Cancelled
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LeaveWithEmployee>> {
    let leave = state.leaves.cancel(id).await?;
    Ok(Json(leave))
}
