//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::events::EmployeeChange;
use shared::models::{EmployeeCreate, EmployeeStatus, EmployeeUpdate, EmployeeWithRefs};

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::{AppError, AppResult};

/// List all employees with department / position names
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<EmployeeWithRefs>>> {
    let employees = employee::find_all(&state.db).await?;
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeWithRefs>> {
    let employee = employee::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;
    Ok(Json(employee))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<EmployeeWithRefs>> {
    let created = employee::create(&state.db, payload).await?;

    state
        .publisher
        .employee_updated(EmployeeChange {
            employee_id: created.id,
            employee_name: created.full_name.clone(),
            change_type: "created".to_string(),
            message: "Employee created".to_string(),
        })
        .await;

    let detail = employee::find_detail(&state.db, created.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", created.id)))?;
    Ok(Json(detail))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<EmployeeWithRefs>> {
    let updated = employee::update(&state.db, id, payload).await?;

    state
        .publisher
        .employee_updated(EmployeeChange {
            employee_id: updated.id,
            employee_name: updated.full_name.clone(),
            change_type: "updated".to_string(),
            message: "Employee updated".to_string(),
        })
        .await;

    let detail = employee::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;
    Ok(Json(detail))
}

/// Delete an employee (contracts and leave requests cascade)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let employee = employee::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

    let deleted = employee::delete(&state.db, id).await?;
    if deleted {
        state
            .publisher
            .employee_updated(EmployeeChange {
                employee_id: id,
                employee_name: employee.full_name.clone(),
                change_type: "deleted".to_string(),
                message: "Employee deleted".to_string(),
            })
            .await;
    }

    Ok(Json(deleted))
}

/// Explicitly set employee status to Active
pub async fn set_active(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeWithRefs>> {
    set_status(state, id, EmployeeStatus::Active, "Employee set to Active").await
}

/// Explicitly set employee status to On Leave
pub async fn set_on_leave(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeWithRefs>> {
    set_status(state, id, EmployeeStatus::OnLeave, "Employee set to On Leave").await
}

async fn set_status(
    state: ServerState,
    id: i64,
    status: EmployeeStatus,
    message: &str,
) -> AppResult<Json<EmployeeWithRefs>> {
    if !employee::set_status(&state.db, id, status).await? {
        return Err(AppError::NotFound(format!("Employee {id} not found")));
    }

    let detail = employee::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

    state
        .publisher
        .employee_updated(EmployeeChange {
            employee_id: id,
            employee_name: detail.full_name.clone(),
            change_type: "status-changed".to_string(),
            message: message.to_string(),
        })
        .await;

    Ok(Json(detail))
}
