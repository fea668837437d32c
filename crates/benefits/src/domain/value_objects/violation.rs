//! Field-level validation failures

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};

/// Reasons a proposed transfer is rejected before reaching the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferViolation {
    /// The source account has no id yet
    SourceNotPersisted,
    DestinationRequired,
    DestinationEqualsSource,
    /// Destination is known locally and inactive
    DestinationInactive,
    AmountRequired,
    AmountNotPositive,
    AmountExceedsSourceBalance,
}

impl TransferViolation {
    /// Form field the violation belongs to
    pub fn field(&self) -> &'static str {
        match self {
            TransferViolation::SourceNotPersisted => "from_id",
            TransferViolation::DestinationRequired
            | TransferViolation::DestinationEqualsSource
            | TransferViolation::DestinationInactive => "to_id",
            TransferViolation::AmountRequired
            | TransferViolation::AmountNotPositive
            | TransferViolation::AmountExceedsSourceBalance => "amount",
        }
    }
}

impl std::fmt::Display for TransferViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferViolation::SourceNotPersisted => write!(f, "source benefit has not been saved"),
            TransferViolation::DestinationRequired => write!(f, "select a destination benefit"),
            TransferViolation::DestinationEqualsSource => {
                write!(f, "cannot transfer to the same benefit")
            }
            TransferViolation::DestinationInactive => write!(f, "destination benefit is inactive"),
            TransferViolation::AmountRequired => write!(f, "amount is required"),
            TransferViolation::AmountNotPositive => write!(f, "amount must be greater than zero"),
            TransferViolation::AmountExceedsSourceBalance => {
                write!(f, "amount cannot exceed the available balance")
            }
        }
    }
}

/// Reasons a create/edit form cannot produce a MutationRequest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormViolation {
    NameRequired,
    NameTooLong,
    DescriptionRequired,
    DescriptionTooLong,
    AmountRequired,
    AmountNotPositive,
}

impl std::fmt::Display for FormViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormViolation::NameRequired => write!(f, "name is required"),
            FormViolation::NameTooLong => {
                write!(f, "name must be at most {} characters", NAME_MAX_CHARS)
            }
            FormViolation::DescriptionRequired => write!(f, "description is required"),
            FormViolation::DescriptionTooLong => write!(
                f,
                "description must be at most {} characters",
                DESCRIPTION_MAX_CHARS
            ),
            FormViolation::AmountRequired => write!(f, "amount is required"),
            FormViolation::AmountNotPositive => write!(f, "amount must be greater than zero"),
        }
    }
}

/// Join violations into a single human-readable line
pub fn describe_violations<V: std::fmt::Display>(violations: &[V]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
