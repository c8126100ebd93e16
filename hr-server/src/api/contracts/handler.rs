//! Employment Contract API Handlers
//!
//! Thin layer over [`ContractService`]; every domain rule lives in the
//! service.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{ContractCreate, ContractWithEmployee};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Active contracts of one employee, newest first
pub async fn list_for_employee(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
) -> AppResult<Json<Vec<ContractWithEmployee>>> {
    let contracts = state.contracts.active_contracts(employee_id).await?;
    Ok(Json(contracts))
}

/// Get contract by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ContractWithEmployee>> {
    let contract = state.contracts.get_contract(id).await?;
    Ok(Json(contract))
}

/// Create a contract for the employee in the path
pub async fn create(
    State(state): State<ServerState>,
    Path(employee_id): Path<i64>,
    Json(payload): Json<ContractCreate>,
) -> AppResult<Json<ContractWithEmployee>> {
    if payload.employee_id != employee_id {
        return Err(AppError::Validation(
            "EmployeeId mismatch between route and body".into(),
        ));
    }

    let contract = state.contracts.create_contract(payload).await?;
    Ok(Json(contract))
}
