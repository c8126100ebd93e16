//! Contract Lifecycle Service (合同生命周期)
//!
//! Owns every status change of employment contracts: creation with
//! overlap detection, and the expiry sweep. Employee status moves as a
//! side effect (Active when a contract takes effect, Inactive when the
//! last active contract ends), always inside the same transaction as the
//! contract change.

use std::sync::Arc;

use shared::events::ContractUpdate;
use shared::models::{ContractCreate, ContractStatus, ContractWithEmployee, EmployeeStatus};
use sqlx::SqlitePool;

use crate::db::repository::{contract, employee};
use crate::notify::NotificationPublisher;
use crate::utils::money;

use super::error::{DomainError, DomainResult, Entity};

#[derive(Clone)]
pub struct ContractService {
    pool: SqlitePool,
    publisher: Arc<dyn NotificationPublisher>,
}

impl ContractService {
    pub fn new(pool: SqlitePool, publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { pool, publisher }
    }

    /// Create a contract for an employee.
    ///
    /// The overlap check and the insert share one transaction — SQLite
    /// serializes writers, so two racing creates for the same employee
    /// cannot both pass the check and commit.
    pub async fn create_contract(&self, data: ContractCreate) -> DomainResult<ContractWithEmployee> {
        let base_salary =
            money::validate_salary(data.base_salary).map_err(DomainError::Validation)?;

        let today = shared::util::today_utc();
        let mut tx = self.pool.begin().await?;

        let employee = employee::find_by_id(&mut *tx, data.employee_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: Entity::Employee,
                id: data.employee_id,
            })?;

        if let Some(end) = data.end_date {
            if end < data.start_date {
                return Err(DomainError::InvalidRange);
            }
        }

        if contract::has_overlapping_active(
            &mut *tx,
            data.employee_id,
            data.start_date,
            data.end_date,
            None,
        )
        .await?
        {
            return Err(DomainError::ContractOverlap);
        }

        // A contract whose end date already passed is recorded as Ended
        let status = match data.end_date {
            Some(end) if end < today => ContractStatus::Ended,
            _ => ContractStatus::Active,
        };

        let id = contract::insert(&mut *tx, &data, base_salary, status).await?;

        // 合同已生效 → 员工转为在职
        if data.start_date <= today && status == ContractStatus::Active {
            employee::set_status(&mut *tx, employee.id, EmployeeStatus::Active).await?;
        }

        tx.commit().await?;

        if status == ContractStatus::Active {
            self.publisher
                .contract_updated(ContractUpdate {
                    contract_id: id,
                    employee_id: employee.id,
                    employee_name: employee.full_name.clone(),
                    status: ContractStatus::Active.as_str().to_string(),
                    end_date: data.end_date,
                    message: "New employment contract created and is now active".to_string(),
                })
                .await;
        }

        contract::find_detail(&self.pool, id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: Entity::Contract,
                id,
            })
    }

    pub async fn get_contract(&self, id: i64) -> DomainResult<ContractWithEmployee> {
        contract::find_detail(&self.pool, id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: Entity::Contract,
                id,
            })
    }

    /// Active contracts of one employee, newest first
    pub async fn active_contracts(&self, employee_id: i64) -> DomainResult<Vec<ContractWithEmployee>> {
        if !employee::exists(&self.pool, employee_id).await? {
            return Err(DomainError::NotFound {
                entity: Entity::Employee,
                id: employee_id,
            });
        }
        Ok(contract::list_active_for_employee(&self.pool, employee_id).await?)
    }

    /// End every active contract whose end date has passed.
    ///
    /// Also invoked by the monitoring loop. All transitions commit as one
    /// batch; notifications go out only after the commit, so a failed
    /// batch publishes nothing. Returns how many contracts were ended.
    pub async fn end_expired_contracts(&self) -> DomainResult<usize> {
        let today = shared::util::today_utc();
        let mut tx = self.pool.begin().await?;

        let expired = contract::list_expired_active(&mut *tx, today).await?;
        if expired.is_empty() {
            return Ok(0);
        }

        let mut notifications = Vec::with_capacity(expired.len());
        for row in &expired {
            contract::set_status(&mut *tx, row.id, ContractStatus::Ended).await?;

            // Last active contract gone → employee becomes inactive
            if !contract::has_other_active(&mut *tx, row.employee_id, row.id).await? {
                employee::set_status(&mut *tx, row.employee_id, EmployeeStatus::Inactive).await?;
                tracing::info!(
                    employee_id = row.employee_id,
                    employee = %row.employee_name,
                    "Employee set to Inactive (no active contracts)"
                );
            }

            notifications.push(ContractUpdate {
                contract_id: row.id,
                employee_id: row.employee_id,
                employee_name: row.employee_name.clone(),
                status: ContractStatus::Ended.as_str().to_string(),
                end_date: row.end_date,
                message: "Employment contract has ended".to_string(),
            });
        }

        tx.commit().await?;

        for notification in notifications {
            self.publisher.contract_updated(notification).await;
        }

        tracing::info!(count = expired.len(), "Ended expired contracts");
        Ok(expired.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::notify::publisher::RecordingPublisher;
    use chrono::{Duration, NaiveDate};
    use shared::events::HubEvent;
    use shared::models::{EmployeeCreate, EmploymentType};

    async fn setup() -> (ContractService, Arc<RecordingPublisher>, SqlitePool) {
        let pool = DbService::memory().await.unwrap().pool;
        let publisher = Arc::new(RecordingPublisher::default());
        let service = ContractService::new(pool.clone(), publisher.clone());
        (service, publisher, pool)
    }

    async fn seed_employee(pool: &SqlitePool, email: &str) -> i64 {
        employee::create(
            pool,
            EmployeeCreate {
                full_name: "Ada Lovelace".into(),
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

    fn today() -> NaiveDate {
        shared::util::today_utc()
    }

    fn contract(employee_id: i64, start: NaiveDate, end: Option<NaiveDate>) -> ContractCreate {
        ContractCreate {
            employee_id,
            start_date: start,
            end_date: end,
            employment_type: EmploymentType::FullTime,
            base_salary: 4200.0,
        }
    }

    #[tokio::test]
    async fn create_for_unknown_employee_fails_not_found() {
        let (service, _, _) = setup().await;
        let err = service
            .create_contract(contract(404, today(), None))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: Entity::Employee, id: 404 }
        ));
    }

    #[tokio::test]
    async fn create_with_end_before_start_fails_invalid_range() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "range@example.com").await;
        let err = service
            .create_contract(contract(emp, today(), Some(today() - Duration::days(1))))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRange));
    }

    #[tokio::test]
    async fn overlapping_active_contract_is_rejected() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "overlap@example.com").await;

        service
            .create_contract(contract(emp, today() - Duration::days(30), Some(today() + Duration::days(300))))
            .await
            .unwrap();

        let err = service
            .create_contract(contract(emp, today(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ContractOverlap));
    }

    #[tokio::test]
    async fn back_to_back_contract_is_accepted() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "renewal@example.com").await;

        let boundary = today() + Duration::days(90);
        service
            .create_contract(contract(emp, today() - Duration::days(30), Some(boundary)))
            .await
            .unwrap();

        // New contract starting exactly on the previous end date
        let renewed = service
            .create_contract(contract(emp, boundary, None))
            .await
            .unwrap();
        assert_eq!(renewed.status, ContractStatus::Active);
    }

    #[tokio::test]
    async fn contract_ending_in_the_past_is_created_as_ended() {
        let (service, publisher, pool) = setup().await;
        let emp = seed_employee(&pool, "past@example.com").await;

        let created = service
            .create_contract(contract(
                emp,
                today() - Duration::days(200),
                Some(today() - Duration::days(10)),
            ))
            .await
            .unwrap();
        assert_eq!(created.status, ContractStatus::Ended);
        // No activation event for a contract that is already over
        assert!(publisher.events().is_empty());
    }

    #[tokio::test]
    async fn effective_contract_activates_employee_and_publishes() {
        let (service, publisher, pool) = setup().await;
        let emp = seed_employee(&pool, "activate@example.com").await;
        employee::set_status(&pool, emp, EmployeeStatus::Inactive)
            .await
            .unwrap();

        let created = service
            .create_contract(contract(emp, today() - Duration::days(1), None))
            .await
            .unwrap();
        assert_eq!(created.status, ContractStatus::Active);

        let fetched = employee::find_by_id(&pool, emp).await.unwrap().unwrap();
        assert_eq!(fetched.status, EmployeeStatus::Active);

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            HubEvent::ContractUpdated(update) => {
                assert_eq!(update.status, "Active");
                assert_eq!(update.employee_id, emp);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn future_contract_does_not_touch_employee_status() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "future@example.com").await;
        employee::set_status(&pool, emp, EmployeeStatus::Inactive)
            .await
            .unwrap();

        service
            .create_contract(contract(emp, today() + Duration::days(30), None))
            .await
            .unwrap();

        let fetched = employee::find_by_id(&pool, emp).await.unwrap().unwrap();
        assert_eq!(fetched.status, EmployeeStatus::Inactive);
    }

    #[tokio::test]
    async fn negative_salary_is_rejected() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "salary@example.com").await;
        let mut data = contract(emp, today(), None);
        data.base_salary = -1.0;
        let err = service.create_contract(data).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn sweep_ends_expired_contract_and_deactivates_employee() {
        let (service, publisher, pool) = setup().await;
        let emp = seed_employee(&pool, "sweep@example.com").await;

        // Seed an active contract whose end date already passed, as if the
        // sweep had not run since
        contract::insert(
            &pool,
            &contract(emp, today() - Duration::days(100), Some(today() - Duration::days(1))),
            4200.0,
            ContractStatus::Active,
        )
        .await
        .unwrap();

        let ended = service.end_expired_contracts().await.unwrap();
        assert_eq!(ended, 1);

        let fetched = employee::find_by_id(&pool, emp).await.unwrap().unwrap();
        assert_eq!(fetched.status, EmployeeStatus::Inactive);

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            HubEvent::ContractUpdated(update) => assert_eq!(update.status, "Ended"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn sweep_is_idempotent_and_does_not_renotify() {
        let (service, publisher, pool) = setup().await;
        let emp = seed_employee(&pool, "idem@example.com").await;
        contract::insert(
            &pool,
            &contract(emp, today() - Duration::days(100), Some(today() - Duration::days(1))),
            4200.0,
            ContractStatus::Active,
        )
        .await
        .unwrap();

        assert_eq!(service.end_expired_contracts().await.unwrap(), 1);
        assert_eq!(service.end_expired_contracts().await.unwrap(), 0);
        assert_eq!(publisher.events().len(), 1);
    }

    #[tokio::test]
    async fn sweep_keeps_employee_active_when_other_contract_remains() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "keep@example.com").await;

        contract::insert(
            &pool,
            &contract(emp, today() - Duration::days(400), Some(today() - Duration::days(1))),
            4200.0,
            ContractStatus::Active,
        )
        .await
        .unwrap();
        // Back-to-back follow-up contract still running
        service
            .create_contract(contract(emp, today() - Duration::days(1), None))
            .await
            .unwrap();

        service.end_expired_contracts().await.unwrap();

        let fetched = employee::find_by_id(&pool, emp).await.unwrap().unwrap();
        assert_eq!(fetched.status, EmployeeStatus::Active);
    }

    #[tokio::test]
    async fn open_ended_contract_never_auto_ends() {
        let (service, _, pool) = setup().await;
        let emp = seed_employee(&pool, "forever@example.com").await;
        let created = service
            .create_contract(contract(emp, today() - Duration::days(1000), None))
            .await
            .unwrap();

        assert_eq!(service.end_expired_contracts().await.unwrap(), 0);
        let fetched = contract::find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ContractStatus::Active);
    }
}
