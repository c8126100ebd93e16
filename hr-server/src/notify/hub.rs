//! Notification hub — broadcast fan-out to connected consoles
//!
//! One process-wide broadcast channel carries every [`HubEvent`]; each
//! WebSocket session holds a receiver. Slow consumers lag and resync on
//! their own; the hub never blocks a sender.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use shared::events::HubEvent;
use tokio::sync::broadcast;

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 256;

/// 通知中心 - 负责事件广播和连接管理
#[derive(Debug)]
pub struct NotificationHub {
    /// 服务器到客户端的广播通道
    tx: broadcast::Sender<HubEvent>,
    /// 已连接的会话 (connection id -> peer label)
    connections: DashMap<u64, String>,
    next_conn_id: AtomicU64,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            tx,
            connections: DashMap::new(),
            next_conn_id: AtomicU64::new(1),
        }
    }

    /// Subscribe a new receiver (one per WebSocket session)
    pub fn subscribe(&self) -> broadcast::Receiver<HubEvent> {
        self.tx.subscribe()
    }

    /// Broadcast one event to every subscriber.
    ///
    /// Returns the number of receivers the event reached; zero when nobody
    /// is listening, which is not an error.
    pub fn publish(&self, event: HubEvent) -> usize {
        let name = event.name();
        match self.tx.send(event) {
            Ok(n) => {
                tracing::debug!(event = name, receivers = n, "Hub event published");
                n
            }
            Err(_) => {
                // No receivers connected right now
                tracing::trace!(event = name, "Hub event published with no subscribers");
                0
            }
        }
    }

    /// Register a session for bookkeeping; returns its connection id
    pub fn register(&self, peer: impl Into<String>) -> u64 {
        let id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(id, peer.into());
        id
    }

    pub fn unregister(&self, id: u64) {
        self.connections.remove(&id);
    }

    /// Number of registered WebSocket sessions
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::events::EmployeeChange;

    fn event(id: i64) -> HubEvent {
        HubEvent::EmployeeUpdated(EmployeeChange {
            employee_id: id,
            employee_name: "X".into(),
            change_type: "updated".into(),
            message: "Employee updated".into(),
        })
    }

    #[tokio::test]
    async fn events_reach_all_subscribers() {
        let hub = NotificationHub::new(8);
        let mut rx1 = hub.subscribe();
        let mut rx2 = hub.subscribe();

        assert_eq!(hub.publish(event(1)), 2);

        assert_eq!(rx1.recv().await.unwrap().name(), "EmployeeUpdated");
        assert_eq!(rx2.recv().await.unwrap().name(), "EmployeeUpdated");
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let hub = NotificationHub::new(8);
        assert_eq!(hub.publish(event(1)), 0);
    }

    #[test]
    fn connection_registry_tracks_sessions() {
        let hub = NotificationHub::default();
        let a = hub.register("peer-a");
        let b = hub.register("peer-b");
        assert_eq!(hub.connection_count(), 2);
        hub.unregister(a);
        hub.unregister(b);
        assert_eq!(hub.connection_count(), 0);
    }
}
