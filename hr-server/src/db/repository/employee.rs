//! Employee Repository

use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate, EmployeeWithRefs};
use sqlx::{Executor, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};

/// Shared SELECT for employee rows joined with department / position names
const DETAIL_SELECT: &str = "SELECT e.id, e.full_name, e.email, e.phone, e.avatar_url, e.status, e.created_at, e.department_id, d.name AS department_name, e.position_id, p.title AS position_title FROM employee e LEFT JOIN department d ON e.department_id = d.id LEFT JOIN position p ON e.position_id = p.id";

fn validate_email(email: &str) -> RepoResult<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') || trimmed.len() > 100 {
        return Err(RepoError::Validation(format!(
            "Invalid email address: {email}"
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> RepoResult<()> {
    if name.trim().is_empty() || name.len() > 100 {
        return Err(RepoError::Validation(
            "Full name must be 1-100 characters".into(),
        ));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<EmployeeWithRefs>> {
    let rows = sqlx::query_as::<_, EmployeeWithRefs>(&format!(
        "{DETAIL_SELECT} ORDER BY e.full_name, e.id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<EmployeeWithRefs>> {
    let row = sqlx::query_as::<_, EmployeeWithRefs>(&format!("{DETAIL_SELECT} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<Employee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, full_name, email, phone, avatar_url, status, created_at, department_id, position_id FROM employee WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(employee)
}

pub async fn exists<'e, E>(ex: E, id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found = sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM employee WHERE id = ?)")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(found != 0)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    validate_name(&data.full_name)?;
    validate_email(&data.email)?;

    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employee (full_name, email, phone, avatar_url, status, created_at, department_id, position_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(data.full_name.trim())
    .bind(data.email.trim())
    .bind(data.phone)
    .bind(data.avatar_url)
    .bind(EmployeeStatus::Active)
    .bind(now)
    .bind(data.department_id)
    .bind(data.position_id)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    if let Some(name) = &data.full_name {
        validate_name(name)?;
    }
    if let Some(email) = &data.email {
        validate_email(email)?;
    }

    let rows = sqlx::query(
        "UPDATE employee SET full_name = COALESCE(?1, full_name), email = COALESCE(?2, email), phone = COALESCE(?3, phone), avatar_url = COALESCE(?4, avatar_url), department_id = COALESCE(?5, department_id), position_id = COALESCE(?6, position_id) WHERE id = ?7",
    )
    .bind(data.full_name.as_deref().map(str::trim))
    .bind(data.email.as_deref().map(str::trim))
    .bind(data.phone)
    .bind(data.avatar_url)
    .bind(data.department_id)
    .bind(data.position_id)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Set employee status; callable from a service transaction or the pool
pub async fn set_status<'e, E>(ex: E, id: i64, status: EmployeeStatus) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE employee SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
