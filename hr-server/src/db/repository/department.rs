//! Department Repository

use shared::models::{Department, DepartmentCreate, DepartmentWithStats};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const STATS_SELECT: &str = "SELECT d.id, d.name, d.manager_id, m.full_name AS manager_name, (SELECT COUNT(*) FROM employee e WHERE e.department_id = d.id) AS employee_count FROM department d LEFT JOIN employee m ON d.manager_id = m.id";

fn validate_name(name: &str) -> RepoResult<()> {
    if name.trim().is_empty() || name.len() > 100 {
        return Err(RepoError::Validation(
            "Department name must be 1-100 characters".into(),
        ));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DepartmentWithStats>> {
    let rows = sqlx::query_as::<_, DepartmentWithStats>(&format!("{STATS_SELECT} ORDER BY d.name"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<DepartmentWithStats>> {
    let row = sqlx::query_as::<_, DepartmentWithStats>(&format!("{STATS_SELECT} WHERE d.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Department>> {
    let department =
        sqlx::query_as::<_, Department>("SELECT id, name, manager_id FROM department WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(department)
}

pub async fn create(pool: &SqlitePool, data: DepartmentCreate) -> RepoResult<Department> {
    validate_name(&data.name)?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO department (name, manager_id) VALUES (?1, ?2) RETURNING id",
    )
    .bind(data.name.trim())
    .bind(data.manager_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create department".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DepartmentCreate) -> RepoResult<Department> {
    validate_name(&data.name)?;

    let rows = sqlx::query("UPDATE department SET name = ?1, manager_id = ?2 WHERE id = ?3")
        .bind(data.name.trim())
        .bind(data.manager_id)
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Department {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Department {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM department WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
