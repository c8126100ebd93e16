//! 实时通知模块
//!
//! # 架构
//!
//! ```text
//! services / monitor ──▶ NotificationPublisher (trait)
//!                               │
//!                      ┌────────┴────────┐
//!                      ▼                 ▼
//!                HubPublisher      LoggingPublisher
//!                      │
//!                NotificationHub (broadcast::Sender<HubEvent>)
//!                      │
//!              WebSocket sessions (/api/notifications/ws)
//! ```
//!
//! Publishing is fire-and-forget: a failed or unheard broadcast is logged
//! and never surfaces to the state transition that triggered it.

pub mod hub;
pub mod publisher;

pub use hub::NotificationHub;
pub use publisher::{HubPublisher, LoggingPublisher, NotificationPublisher};
