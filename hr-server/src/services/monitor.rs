//! HR Monitoring Loop (定时巡检)
//!
//! One recurring task, started with the process, first pass immediately.
//! Each pass, in order:
//!
//! 1. end expired contracts
//! 2. complete finished leaves
//! 3. warn about contracts ending within 30 days
//! 4. warn about approved leaves starting within 7 days
//!
//! Steps 3–4 mutate nothing and fire again on every pass while the entity
//! stays inside its window — the hub stream is a reminder feed, not an
//! inbox. A failed pass is logged and the schedule continues; shutdown
//! cancels the inter-tick delay promptly.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use shared::events::{ContractExpiry, LeaveReminder};
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use crate::db::repository::{contract, leave_request};
use crate::notify::NotificationPublisher;

use super::error::DomainResult;
use super::{ContractService, LeaveService};

/// Look-ahead horizon for contract expiry warnings
pub const CONTRACT_EXPIRY_WINDOW_DAYS: i64 = 30;

/// Look-ahead horizon for upcoming leave warnings
pub const LEAVE_START_WINDOW_DAYS: i64 = 7;

pub struct HrMonitor {
    pool: SqlitePool,
    contracts: ContractService,
    leaves: LeaveService,
    publisher: Arc<dyn NotificationPublisher>,
    interval: Duration,
}

impl HrMonitor {
    pub fn new(
        pool: SqlitePool,
        contracts: ContractService,
        leaves: LeaveService,
        publisher: Arc<dyn NotificationPublisher>,
        interval: Duration,
    ) -> Self {
        Self {
            pool,
            contracts,
            leaves,
            publisher,
            interval,
        }
    }

    /// Run until the token cancels. The first pass happens right away.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(interval_secs = self.interval.as_secs(), "HR monitor started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    // One bad pass never stops the schedule
                    if let Err(e) = self.sweep().await {
                        tracing::error!(error = %e, "HR monitoring pass failed");
                    }
                }
            }
        }

        tracing::info!("HR monitor stopped");
    }

    /// One full monitoring pass
    pub async fn sweep(&self) -> DomainResult<()> {
        let today = shared::util::today_utc();
        tracing::debug!(%today, "Starting HR monitoring pass");

        let ended = self.contracts.end_expired_contracts().await?;
        let completed = self.leaves.complete_expired_leaves().await?;
        let expiring = self.notify_expiring_contracts(today).await?;
        let upcoming = self.notify_upcoming_leaves(today).await?;

        tracing::info!(
            ended,
            completed,
            expiring,
            upcoming,
            "Completed HR monitoring pass"
        );
        Ok(())
    }

    /// Warn about active contracts ending inside the 30-day window
    async fn notify_expiring_contracts(&self, today: NaiveDate) -> DomainResult<usize> {
        let until = today + chrono::Duration::days(CONTRACT_EXPIRY_WINDOW_DAYS);
        let rows = contract::list_expiring_window(&self.pool, today, until).await?;

        for row in &rows {
            let Some(end_date) = row.end_date else {
                continue;
            };
            self.publisher
                .contract_expiring(ContractExpiry {
                    contract_id: row.id,
                    employee_id: row.employee_id,
                    employee_name: row.employee_name.clone(),
                    employee_email: row.employee_email.clone(),
                    end_date,
                    days_until_expiry: (end_date - today).num_days(),
                    employment_type: row.employment_type,
                    base_salary: row.base_salary,
                })
                .await;
        }

        Ok(rows.len())
    }

    /// Warn about approved leaves starting inside the 7-day window
    async fn notify_upcoming_leaves(&self, today: NaiveDate) -> DomainResult<usize> {
        let until = today + chrono::Duration::days(LEAVE_START_WINDOW_DAYS);
        let rows = leave_request::list_upcoming_approved(&self.pool, today, until).await?;

        for row in &rows {
            self.publisher
                .upcoming_leave(LeaveReminder {
                    leave_request_id: row.id,
                    employee_id: row.employee_id,
                    employee_name: row.employee_name.clone(),
                    employee_email: row.employee_email.clone(),
                    leave_type: row.leave_type,
                    start_date: row.start_date,
                    end_date: row.end_date,
                    days_until_start: (row.start_date - today).num_days(),
                    reason: row.reason.clone(),
                })
                .await;
        }

        Ok(rows.len())
    }
}
