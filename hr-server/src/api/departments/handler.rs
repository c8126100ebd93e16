//! Department API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{DepartmentCreate, DepartmentWithStats};

use crate::core::ServerState;
use crate::db::repository::department;
use crate::utils::{AppError, AppResult};

/// List all departments with manager names and headcounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DepartmentWithStats>>> {
    let departments = department::find_all(&state.db).await?;
    Ok(Json(departments))
}

/// Get department by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DepartmentWithStats>> {
    let department = department::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {id} not found")))?;
    Ok(Json(department))
}

/// Create a new department
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<DepartmentWithStats>> {
    let created = department::create(&state.db, payload).await?;
    let detail = department::find_detail(&state.db, created.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", created.id)))?;
    Ok(Json(detail))
}

/// Replace a department's name / manager
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentCreate>,
) -> AppResult<Json<DepartmentWithStats>> {
    department::update(&state.db, id, payload).await?;
    let detail = department::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Department {id} not found")))?;
    Ok(Json(detail))
}

/// Delete a department (its positions cascade, employees detach)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = department::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Department {id} not found")));
    }
    Ok(Json(true))
}
