//! Shared types for the HR administration backend
//!
//! Common types used by the server and its clients: domain models,
//! API payloads and the notification events pushed over the hub.

pub mod events;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Notification re-exports (for convenient access)
pub use events::HubEvent;
