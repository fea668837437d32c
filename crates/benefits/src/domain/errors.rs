//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

use super::value_objects::{describe_violations, TransferViolation};
use super::BenefitId;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Local transfer validation failed; nothing was sent to the store
    #[error("Invalid transfer: {}", describe_violations(.0.as_slice()))]
    InvalidTransfer(Vec<TransferViolation>),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Failure reported by the store collaborator, text kept verbatim
    #[error("{0}")]
    Store(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: BenefitId) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Violations when this is a local transfer validation failure
    pub fn violations(&self) -> Option<&[TransferViolation]> {
        match self {
            DomainError::InvalidTransfer(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_displays_collaborator_text() {
        let err = DomainError::store("Insufficient balance");
        assert_eq!(err.to_string(), "Insufficient balance");
    }

    #[test]
    fn test_invalid_transfer_lists_violations() {
        let err = DomainError::InvalidTransfer(vec![
            TransferViolation::DestinationRequired,
            TransferViolation::AmountRequired,
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid transfer: select a destination benefit; amount is required"
        );
        assert_eq!(err.violations().map(|v| v.len()), Some(2));
    }
}
