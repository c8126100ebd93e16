//! Domain error taxonomy
//!
//! Every rule violation the lifecycle services can raise, with the stable
//! machine codes the admin console matches on and the HTTP status each
//! kind maps to. Infrastructure failures travel as [`DomainError::
//! Persistence`] and render as a generic server error.

use std::fmt;

use http::StatusCode;
use thiserror::Error;

use crate::db::repository::RepoError;

/// Entities a NotFound can name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Employee,
    Contract,
    LeaveRequest,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Employee => write!(f, "Employee"),
            Entity::Contract => write!(f, "Contract"),
            Entity::LeaveRequest => write!(f, "Leave request"),
        }
    }
}

/// 领域规则错误
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("End date must be on or after start date")]
    InvalidRange,

    #[error("Employee already has an active contract that overlaps with the specified date range")]
    ContractOverlap,

    #[error("Employee already has an approved leave request that overlaps with this date range")]
    LeaveOverlap,

    #[error("Leave request dates must fall within an active employment contract period")]
    NoValidContract,

    #[error("Only leave requests in {required} status can be {action} (current status: {current})")]
    InvalidTransition {
        required: &'static str,
        action: &'static str,
        current: String,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Persistence(String),
}

impl DomainError {
    /// Stable machine code carried in the error response body
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::NotFound { entity, .. } => match entity {
                Entity::Employee => "EMPLOYEE_NOT_FOUND",
                Entity::Contract => "CONTRACT_NOT_FOUND",
                Entity::LeaveRequest => "LEAVE_REQUEST_NOT_FOUND",
            },
            DomainError::InvalidRange => "INVALID_DATE_RANGE",
            DomainError::ContractOverlap => "OVERLAPPING_CONTRACT",
            DomainError::LeaveOverlap => "OVERLAPPING_LEAVE",
            DomainError::NoValidContract => "NO_VALID_CONTRACT",
            DomainError::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            DomainError::Validation(_) => "VALIDATION_ERROR",
            DomainError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// HTTP status the controller layer translates this kind into
    pub fn status(&self) -> StatusCode {
        match self {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::InvalidRange | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::ContractOverlap
            | DomainError::LeaveOverlap
            | DomainError::InvalidTransition { .. } => StatusCode::CONFLICT,
            DomainError::NoValidContract => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Validation(msg) => DomainError::Validation(msg),
            other => DomainError::Persistence(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::Persistence(err.to_string())
    }
}

/// Result type for service operations
pub type DomainResult<T> = Result<T, DomainError>;
