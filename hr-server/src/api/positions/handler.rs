//! Position API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{PositionCreate, PositionWithStats};

use crate::core::ServerState;
use crate::db::repository::position;
use crate::utils::{AppError, AppResult};

/// List all positions with department names and headcounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PositionWithStats>>> {
    let positions = position::find_all(&state.db).await?;
    Ok(Json(positions))
}

/// Get position by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PositionWithStats>> {
    let position = position::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Position {id} not found")))?;
    Ok(Json(position))
}

/// Create a new position
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PositionCreate>,
) -> AppResult<Json<PositionWithStats>> {
    let created = position::create(&state.db, payload).await?;
    let detail = position::find_detail(&state.db, created.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Position {} not found", created.id)))?;
    Ok(Json(detail))
}

/// Replace a position's title / department
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PositionCreate>,
) -> AppResult<Json<PositionWithStats>> {
    position::update(&state.db, id, payload).await?;
    let detail = position::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Position {id} not found")))?;
    Ok(Json(detail))
}

/// Delete a position (employees detach)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = position::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Position {id} not found")));
    }
    Ok(Json(true))
}
