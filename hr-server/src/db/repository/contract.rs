//! Employment Contract Repository
//!
//! Contract spans are half-open `[start_date, end_date)`; a NULL end date
//! means the span is unbounded. All range predicates run in SQL so the
//! overlap decision and the row mutation share one transaction.

use chrono::NaiveDate;
use shared::models::{
    ContractCreate, ContractStatus, ContractSweepRow, ContractWithEmployee, EmploymentContract,
};
use sqlx::{Executor, Sqlite, SqlitePool};

use super::{DATE_MAX, RepoResult};

const DETAIL_SELECT: &str = "SELECT c.id, c.employee_id, e.full_name AS employee_name, c.start_date, c.end_date, c.employment_type, c.base_salary, c.status FROM employment_contract c JOIN employee e ON c.employee_id = e.id";

const SWEEP_SELECT: &str = "SELECT c.id, c.employee_id, e.full_name AS employee_name, e.email AS employee_email, c.start_date, c.end_date, c.employment_type, c.base_salary, c.status FROM employment_contract c JOIN employee e ON c.employee_id = e.id";

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<EmploymentContract>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let contract = sqlx::query_as::<_, EmploymentContract>(
        "SELECT id, employee_id, start_date, end_date, employment_type, base_salary, status FROM employment_contract WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(contract)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<ContractWithEmployee>> {
    let row = sqlx::query_as::<_, ContractWithEmployee>(&format!("{DETAIL_SELECT} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active contracts of one employee, newest first
pub async fn list_active_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> RepoResult<Vec<ContractWithEmployee>> {
    let rows = sqlx::query_as::<_, ContractWithEmployee>(&format!(
        "{DETAIL_SELECT} WHERE c.employee_id = ?1 AND c.status = ?2 ORDER BY c.start_date DESC"
    ))
    .bind(employee_id)
    .bind(ContractStatus::Active)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Does any Active contract of the employee intersect `[start, end|∞)`?
///
/// Half-open test: `s1 < e2 AND s2 < e1`, so a contract ending exactly on
/// `start` does not collide (back-to-back renewals are legal).
pub async fn has_overlapping_active<'e, E>(
    ex: E,
    employee_id: i64,
    start: NaiveDate,
    end: Option<NaiveDate>,
    exclude_id: Option<i64>,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let overlap = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT EXISTS(SELECT 1 FROM employment_contract WHERE employee_id = ?1 AND status = ?2 AND (?3 IS NULL OR id != ?3) AND start_date < COALESCE(?4, '{DATE_MAX}') AND COALESCE(end_date, '{DATE_MAX}') > ?5)"
    ))
    .bind(employee_id)
    .bind(ContractStatus::Active)
    .bind(exclude_id)
    .bind(end)
    .bind(start)
    .fetch_one(ex)
    .await?;
    Ok(overlap != 0)
}

/// Is `[start, end]` fully inside some Active contract span?
///
/// The contract end bound is inclusive here: a leave may run through the
/// contract's final day.
pub async fn has_active_containing<'e, E>(
    ex: E,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let contained = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT EXISTS(SELECT 1 FROM employment_contract WHERE employee_id = ?1 AND status = ?2 AND start_date <= ?3 AND COALESCE(end_date, '{DATE_MAX}') >= ?4)"
    ))
    .bind(employee_id)
    .bind(ContractStatus::Active)
    .bind(start)
    .bind(end)
    .fetch_one(ex)
    .await?;
    Ok(contained != 0)
}

pub async fn insert<'e, E>(
    ex: E,
    data: &ContractCreate,
    base_salary: f64,
    status: ContractStatus,
) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO employment_contract (employee_id, start_date, end_date, employment_type, base_salary, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(data.employee_id)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.employment_type)
    .bind(base_salary)
    .bind(status)
    .fetch_one(ex)
    .await?;
    Ok(id)
}

pub async fn set_status<'e, E>(ex: E, id: i64, status: ContractStatus) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE employment_contract SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Active contracts whose end date has passed (candidates for the sweep)
pub async fn list_expired_active<'e, E>(ex: E, today: NaiveDate) -> RepoResult<Vec<ContractSweepRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ContractSweepRow>(&format!(
        "{SWEEP_SELECT} WHERE c.status = ?1 AND c.end_date IS NOT NULL AND c.end_date < ?2 ORDER BY c.id"
    ))
    .bind(ContractStatus::Active)
    .bind(today)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Does the employee hold any other Active contract besides `exclude_id`?
pub async fn has_other_active<'e, E>(ex: E, employee_id: i64, exclude_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found = sqlx::query_scalar::<_, i64>(
        "SELECT EXISTS(SELECT 1 FROM employment_contract WHERE employee_id = ?1 AND id != ?2 AND status = ?3)",
    )
    .bind(employee_id)
    .bind(exclude_id)
    .bind(ContractStatus::Active)
    .fetch_one(ex)
    .await?;
    Ok(found != 0)
}

/// Active contracts ending inside `[from, until]`, for expiry warnings
pub async fn list_expiring_window(
    pool: &SqlitePool,
    from: NaiveDate,
    until: NaiveDate,
) -> RepoResult<Vec<ContractSweepRow>> {
    let rows = sqlx::query_as::<_, ContractSweepRow>(&format!(
        "{SWEEP_SELECT} WHERE c.status = ?1 AND c.end_date IS NOT NULL AND c.end_date >= ?2 AND c.end_date <= ?3 ORDER BY c.end_date, c.id"
    ))
    .bind(ContractStatus::Active)
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
