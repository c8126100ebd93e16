//! Leave Request Repository
//!
//! Leave spans are closed intervals `[start_date, end_date]`; overlap
//! against other approved leaves is inclusive on both bounds.

use chrono::NaiveDate;
use shared::models::{
    LeaveCreate, LeaveRequest, LeaveRequestStatus, LeaveSweepRow, LeaveWithEmployee,
};
use sqlx::{Executor, Sqlite, SqlitePool};

use super::RepoResult;

const DETAIL_SELECT: &str = "SELECT l.id, l.employee_id, e.full_name AS employee_name, l.leave_type, l.start_date, l.end_date, l.reason, l.status, l.approver_name FROM leave_request l JOIN employee e ON l.employee_id = e.id";

const SWEEP_SELECT: &str = "SELECT l.id, l.employee_id, e.full_name AS employee_name, e.email AS employee_email, l.leave_type, l.start_date, l.end_date, l.reason, l.status FROM leave_request l JOIN employee e ON l.employee_id = e.id";

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<LeaveRequest>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let leave = sqlx::query_as::<_, LeaveRequest>(
        "SELECT id, employee_id, leave_type, start_date, end_date, reason, status, approver_name FROM leave_request WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(leave)
}

pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<LeaveWithEmployee>> {
    let row = sqlx::query_as::<_, LeaveWithEmployee>(&format!("{DETAIL_SELECT} WHERE l.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All leave requests of one employee, newest first
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> RepoResult<Vec<LeaveWithEmployee>> {
    let rows = sqlx::query_as::<_, LeaveWithEmployee>(&format!(
        "{DETAIL_SELECT} WHERE l.employee_id = ? ORDER BY l.start_date DESC, l.id DESC"
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert<'e, E>(ex: E, data: &LeaveCreate) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO leave_request (employee_id, leave_type, start_date, end_date, reason, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
    )
    .bind(data.employee_id)
    .bind(data.leave_type)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.reason.as_deref())
    .bind(LeaveRequestStatus::Draft)
    .fetch_one(ex)
    .await?;
    Ok(id)
}

/// Persist the editable fields of a draft after the service merged them
pub async fn update_fields<'e, E>(ex: E, leave: &LeaveRequest) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE leave_request SET leave_type = ?1, start_date = ?2, end_date = ?3, reason = ?4 WHERE id = ?5",
    )
    .bind(leave.leave_type)
    .bind(leave.start_date)
    .bind(leave.end_date)
    .bind(leave.reason.as_deref())
    .bind(leave.id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Set leave status; the approver column is only written when provided
pub async fn set_status<'e, E>(
    ex: E,
    id: i64,
    status: LeaveRequestStatus,
    approver_name: Option<&str>,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE leave_request SET status = ?1, approver_name = COALESCE(?2, approver_name) WHERE id = ?3",
    )
    .bind(status)
    .bind(approver_name)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Does any other Approved leave of the employee overlap `[start, end]`?
///
/// Closed-interval test: `s1 <= e2 AND s2 <= e1`.
pub async fn has_overlapping_approved<'e, E>(
    ex: E,
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<i64>,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let overlap = sqlx::query_scalar::<_, i64>(
        "SELECT EXISTS(SELECT 1 FROM leave_request WHERE employee_id = ?1 AND status = ?2 AND (?3 IS NULL OR id != ?3) AND start_date <= ?4 AND end_date >= ?5)",
    )
    .bind(employee_id)
    .bind(LeaveRequestStatus::Approved)
    .bind(exclude_id)
    .bind(end)
    .bind(start)
    .fetch_one(ex)
    .await?;
    Ok(overlap != 0)
}

/// Approved leaves whose end date has passed (candidates for completion)
pub async fn list_expired_approved<'e, E>(ex: E, today: NaiveDate) -> RepoResult<Vec<LeaveSweepRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, LeaveSweepRow>(&format!(
        "{SWEEP_SELECT} WHERE l.status = ?1 AND l.end_date < ?2 ORDER BY l.id"
    ))
    .bind(LeaveRequestStatus::Approved)
    .bind(today)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Approved leaves starting inside `[from, until]`, for upcoming reminders
pub async fn list_upcoming_approved(
    pool: &SqlitePool,
    from: NaiveDate,
    until: NaiveDate,
) -> RepoResult<Vec<LeaveSweepRow>> {
    let rows = sqlx::query_as::<_, LeaveSweepRow>(&format!(
        "{SWEEP_SELECT} WHERE l.status = ?1 AND l.start_date >= ?2 AND l.start_date <= ?3 ORDER BY l.start_date, l.id"
    ))
    .bind(LeaveRequestStatus::Approved)
    .bind(from)
    .bind(until)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{EmployeeCreate, LeaveType};

    async fn test_pool() -> SqlitePool {
        DbService::memory().await.unwrap().pool
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn seed_employee(pool: &SqlitePool, email: &str) -> i64 {
        super::super::employee::create(
            pool,
            EmployeeCreate {
                full_name: "Test Person".into(),
                email: email.into(),
                phone: None,
                avatar_url: None,
                department_id: None,
                position_id: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn seed_leave(
        pool: &SqlitePool,
        employee_id: i64,
        start: &str,
        end: &str,
        status: LeaveRequestStatus,
    ) -> i64 {
        let id = insert(
            pool,
            &LeaveCreate {
                employee_id,
                leave_type: LeaveType::Annual,
                start_date: date(start),
                end_date: date(end),
                reason: None,
            },
        )
        .await
        .unwrap();
        set_status(pool, id, status, None).await.unwrap();
        id
    }

    #[tokio::test]
    async fn approved_overlap_is_inclusive_on_both_bounds() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "leave.overlap@example.com").await;
        seed_leave(&pool, emp, "2024-06-01", "2024-06-10", LeaveRequestStatus::Approved).await;

        // Touching the last day collides (closed interval)
        assert!(
            has_overlapping_approved(&pool, emp, date("2024-06-10"), date("2024-06-15"), None)
                .await
                .unwrap()
        );
        // Day after is clear
        assert!(
            !has_overlapping_approved(&pool, emp, date("2024-06-11"), date("2024-06-15"), None)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn non_approved_leaves_do_not_block() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "leave.draft@example.com").await;
        seed_leave(&pool, emp, "2024-06-01", "2024-06-10", LeaveRequestStatus::Submitted).await;
        seed_leave(&pool, emp, "2024-06-01", "2024-06-10", LeaveRequestStatus::Rejected).await;

        assert!(
            !has_overlapping_approved(&pool, emp, date("2024-06-05"), date("2024-06-07"), None)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn exclude_id_skips_the_leave_itself() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "leave.self@example.com").await;
        let id =
            seed_leave(&pool, emp, "2024-06-01", "2024-06-10", LeaveRequestStatus::Approved).await;

        assert!(
            !has_overlapping_approved(&pool, emp, date("2024-06-01"), date("2024-06-10"), Some(id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn approver_column_survives_status_updates_without_name() {
        let pool = test_pool().await;
        let emp = seed_employee(&pool, "leave.approver@example.com").await;
        let id = seed_leave(&pool, emp, "2024-06-01", "2024-06-10", LeaveRequestStatus::Submitted)
            .await;

        set_status(&pool, id, LeaveRequestStatus::Approved, Some("Jane"))
            .await
            .unwrap();
        set_status(&pool, id, LeaveRequestStatus::Completed, None)
            .await
            .unwrap();

        let leave = find_by_id(&pool, id).await.unwrap().unwrap();
        assert_eq!(leave.status, LeaveRequestStatus::Completed);
        assert_eq!(leave.approver_name.as_deref(), Some("Jane"));
    }
}
