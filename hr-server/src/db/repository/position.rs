//! Position Repository

use shared::models::{Position, PositionCreate, PositionWithStats};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const STATS_SELECT: &str = "SELECT p.id, p.title, p.department_id, d.name AS department_name, (SELECT COUNT(*) FROM employee e WHERE e.position_id = p.id) AS employee_count FROM position p JOIN department d ON p.department_id = d.id";

fn validate_title(title: &str) -> RepoResult<()> {
    if title.trim().is_empty() || title.len() > 100 {
        return Err(RepoError::Validation(
            "Position title must be 1-100 characters".into(),
        ));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<PositionWithStats>> {
    let rows = sqlx::query_as::<_, PositionWithStats>(&format!(
        "{STATS_SELECT} ORDER BY d.name, p.title"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<PositionWithStats>> {
    let row = sqlx::query_as::<_, PositionWithStats>(&format!("{STATS_SELECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Position>> {
    let position =
        sqlx::query_as::<_, Position>("SELECT id, title, department_id FROM position WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(position)
}

pub async fn create(pool: &SqlitePool, data: PositionCreate) -> RepoResult<Position> {
    validate_title(&data.title)?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO position (title, department_id) VALUES (?1, ?2) RETURNING id",
    )
    .bind(data.title.trim())
    .bind(data.department_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create position".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: PositionCreate) -> RepoResult<Position> {
    validate_title(&data.title)?;

    let rows = sqlx::query("UPDATE position SET title = ?1, department_id = ?2 WHERE id = ?3")
        .bind(data.title.trim())
        .bind(data.department_id)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Position {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Position {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM position WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
