// Copyright 2025 Cowboy AI, LLC.

//! Error types for parking domain operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur in parking domain operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A floor, spot, ticket, or vehicle could not be found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Type of entity that wasn't found
        entity: &'static str,
        /// Identity that was searched for
        id: String,
    },

    /// The operation conflicts with current state (duplicate floor,
    /// occupied resource blocking removal or maintenance)
    #[error("conflict: {reason}")]
    Conflict {
        /// Reason the operation was rejected
        reason: String,
    },

    /// No eligible spot exists for the requested vehicle category
    #[error("no available parking spot for {vehicle} vehicles")]
    NoCapacity {
        /// Vehicle category that could not be placed
        vehicle: String,
    },

    /// The vehicle already holds an active ticket
    #[error("vehicle {plate} already has an active parking ticket")]
    AlreadyActive {
        /// Normalized license plate
        plate: String,
    },

    /// Exit time precedes entry time
    #[error("exit time {exit} precedes entry time {entry}")]
    InvalidInterval {
        /// Recorded entry time (RFC 3339)
        entry: String,
        /// Requested exit time (RFC 3339)
        exit: String,
    },

    /// Unexpected internal fault; fatal to the request, never to the process
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Convenience constructor for [`DomainError::NotFound`]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Convenience constructor for [`DomainError::Conflict`]
    pub fn conflict(reason: impl Into<String>) -> Self {
        DomainError::Conflict {
            reason: reason.into(),
        }
    }

    /// Whether this error is an expected business condition, as opposed to
    /// an internal fault. Business errors are reported to the caller as
    /// structured failures; internal faults indicate a broken collaborator.
    pub fn is_business(&self) -> bool {
        !matches!(self, DomainError::Internal(_))
    }

    /// Stable machine-readable kind for transport-layer mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::NoCapacity { .. } => ErrorKind::NoCapacity,
            DomainError::AlreadyActive { .. } => ErrorKind::AlreadyActive,
            DomainError::InvalidInterval { .. } => ErrorKind::InvalidInterval,
            DomainError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Machine-readable error classification, mirroring the variants of
/// [`DomainError`] without their payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Entity absent
    NotFound,
    /// Duplicate or occupied resource
    Conflict,
    /// Lot full for the requested category
    NoCapacity,
    /// Vehicle already parked
    AlreadyActive,
    /// Exit precedes entry
    InvalidInterval,
    /// Unexpected internal fault
    Internal,
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
