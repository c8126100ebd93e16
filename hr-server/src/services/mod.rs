//! Domain rule layer (领域服务)
//!
//! The only place where HR state machines live:
//!
//! - [`ContractService`] — employment contract creation and temporal
//!   transitions, overlap detection
//! - [`LeaveService`] — leave request lifecycle
//!   (draft/submit/approve/reject/cancel/complete)
//! - [`HrMonitor`] — recurring sweep applying time-driven transitions and
//!   look-ahead notifications
//!
//! Controllers talk to these services; the services talk to the
//! repositories and the notification publisher. Nothing else mutates
//! contract or leave status.

pub mod contracts;
pub mod error;
pub mod leaves;
pub mod monitor;

pub use contracts::ContractService;
pub use error::{DomainError, DomainResult, Entity};
pub use leaves::LeaveService;
pub use monitor::HrMonitor;
