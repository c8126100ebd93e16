//! Notification publisher capability
//!
//! One trait carries every event the lifecycle services and the monitor
//! publish. Implementations are best-effort by contract: a publish that
//! cannot be delivered is logged at the publish site and the caller never
//! sees a failure.

use std::sync::Arc;

use async_trait::async_trait;
use shared::events::{
    ContractExpiry, ContractUpdate, EmployeeChange, HubEvent, LeaveReminder, LeaveStatusChange,
};

use super::hub::NotificationHub;

/// Fire-and-forget publishing of HR events
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Employee record changed (created / updated / deleted / status action)
    async fn employee_updated(&self, event: EmployeeChange);

    /// Contract became active or ended
    async fn contract_updated(&self, event: ContractUpdate);

    /// Contract inside the 30-day expiry window
    async fn contract_expiring(&self, event: ContractExpiry);

    /// Leave request changed status (approved / rejected / cancelled /
    /// completed)
    async fn leave_updated(&self, event: LeaveStatusChange);

    /// Approved leave inside the 7-day start window
    async fn upcoming_leave(&self, event: LeaveReminder);
}

/// Hub-backed implementation — broadcasts to every connected console
#[derive(Debug, Clone)]
pub struct HubPublisher {
    hub: Arc<NotificationHub>,
}

impl HubPublisher {
    pub fn new(hub: Arc<NotificationHub>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl NotificationPublisher for HubPublisher {
    async fn employee_updated(&self, event: EmployeeChange) {
        self.hub.publish(HubEvent::EmployeeUpdated(event));
    }

    async fn contract_updated(&self, event: ContractUpdate) {
        tracing::info!(
            contract_id = event.contract_id,
            employee = %event.employee_name,
            status = %event.status,
            "Published ContractUpdated notification"
        );
        self.hub.publish(HubEvent::ContractUpdated(event));
    }

    async fn contract_expiring(&self, event: ContractExpiry) {
        tracing::info!(
            contract_id = event.contract_id,
            employee = %event.employee_name,
            days = event.days_until_expiry,
            "Published ContractExpiringSoon notification"
        );
        self.hub.publish(HubEvent::ContractExpiringSoon(event));
    }

    async fn leave_updated(&self, event: LeaveStatusChange) {
        tracing::info!(
            leave_id = event.leave_request_id,
            employee = %event.employee_name,
            status = %event.status,
            "Published LeaveRequestUpdated notification"
        );
        self.hub.publish(HubEvent::LeaveRequestUpdated(event));
    }

    async fn upcoming_leave(&self, event: LeaveReminder) {
        tracing::info!(
            leave_id = event.leave_request_id,
            employee = %event.employee_name,
            days = event.days_until_start,
            "Published UpcomingLeave notification"
        );
        self.hub.publish(HubEvent::UpcomingLeave(event));
    }
}

/// Log-only implementation for headless deployments and tests
#[derive(Debug, Clone, Default)]
pub struct LoggingPublisher;

#[async_trait]
impl NotificationPublisher for LoggingPublisher {
    async fn employee_updated(&self, event: EmployeeChange) {
        tracing::info!(
            employee_id = event.employee_id,
            change = %event.change_type,
            "Employee updated: {}",
            event.employee_name
        );
    }

    async fn contract_updated(&self, event: ContractUpdate) {
        tracing::info!(
            contract_id = event.contract_id,
            employee_id = event.employee_id,
            status = %event.status,
            "Contract updated: {}",
            event.message
        );
    }

    async fn contract_expiring(&self, event: ContractExpiry) {
        tracing::info!(
            contract_id = event.contract_id,
            employee_id = event.employee_id,
            days = event.days_until_expiry,
            end_date = %event.end_date,
            "Contract expiring soon for {}",
            event.employee_name
        );
    }

    async fn leave_updated(&self, event: LeaveStatusChange) {
        tracing::info!(
            leave_id = event.leave_request_id,
            employee_id = event.employee_id,
            status = %event.status,
            "Leave request updated: {}",
            event.message
        );
    }

    async fn upcoming_leave(&self, event: LeaveReminder) {
        tracing::info!(
            leave_id = event.leave_request_id,
            employee_id = event.employee_id,
            days = event.days_until_start,
            start_date = %event.start_date,
            "Upcoming leave for {}",
            event.employee_name
        );
    }
}

/// Test double that records every event it sees
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: std::sync::Mutex<Vec<HubEvent>>,
}

#[cfg(test)]
impl RecordingPublisher {
    pub fn events(&self) -> Vec<HubEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }

    fn push(&self, event: HubEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn employee_updated(&self, event: EmployeeChange) {
        self.push(HubEvent::EmployeeUpdated(event));
    }

    async fn contract_updated(&self, event: ContractUpdate) {
        self.push(HubEvent::ContractUpdated(event));
    }

    async fn contract_expiring(&self, event: ContractExpiry) {
        self.push(HubEvent::ContractExpiringSoon(event));
    }

    async fn leave_updated(&self, event: LeaveStatusChange) {
        self.push(HubEvent::LeaveRequestUpdated(event));
    }

    async fn upcoming_leave(&self, event: LeaveReminder) {
        self.push(HubEvent::UpcomingLeave(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change() -> EmployeeChange {
        EmployeeChange {
            employee_id: 1,
            employee_name: "Ada Lovelace".into(),
            change_type: "created".into(),
            message: "Employee created".into(),
        }
    }

    #[tokio::test]
    async fn hub_publisher_forwards_to_subscribers() {
        let hub = Arc::new(NotificationHub::new(8));
        let mut rx = hub.subscribe();
        let publisher: Arc<dyn NotificationPublisher> = Arc::new(HubPublisher::new(hub));

        publisher.employee_updated(change()).await;
        assert_eq!(rx.recv().await.unwrap().name(), "EmployeeUpdated");
    }

    #[tokio::test]
    async fn logging_publisher_is_a_drop_in_capability() {
        // Headless deployments swap the hub for log-only output; the trait
        // object contract must hold either way.
        let publisher: Arc<dyn NotificationPublisher> = Arc::new(LoggingPublisher);
        publisher.employee_updated(change()).await;
    }
}
