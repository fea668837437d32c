//! Notification - Outcome messages delivered to presentation

use serde::{Deserialize, Serialize};

/// The user intent an outcome refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationAction {
    Load,
    Create,
    Update,
    Deactivate,
    Transfer,
}

impl std::fmt::Display for MutationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationAction::Load => write!(f, "load"),
            MutationAction::Create => write!(f, "create"),
            MutationAction::Update => write!(f, "update"),
            MutationAction::Deactivate => write!(f, "deactivate"),
            MutationAction::Transfer => write!(f, "transfer"),
        }
    }
}

/// Success or failure report for a completed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Success { action: MutationAction },
    /// `error` is the collaborator's text, unchanged
    Failure { action: MutationAction, error: String },
}

impl Notification {
    pub fn success(action: MutationAction) -> Self {
        Self::Success { action }
    }

    pub fn failure(action: MutationAction, error: impl Into<String>) -> Self {
        Self::Failure {
            action,
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failure { .. })
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notification::Success { action } => match action {
                MutationAction::Load => write!(f, "Benefits loaded"),
                MutationAction::Create => write!(f, "Benefit created successfully"),
                MutationAction::Update => write!(f, "Benefit updated successfully"),
                MutationAction::Deactivate => write!(f, "Benefit deactivated successfully"),
                MutationAction::Transfer => write!(f, "Transfer completed successfully"),
            },
            Notification::Failure { action, error } => match action {
                MutationAction::Load => write!(f, "Failed to load benefits: {}", error),
                MutationAction::Create => write!(f, "Failed to create benefit: {}", error),
                MutationAction::Update => write!(f, "Failed to update benefit: {}", error),
                MutationAction::Deactivate => write!(f, "Failed to deactivate benefit: {}", error),
                MutationAction::Transfer => write!(f, "Failed to transfer: {}", error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_keeps_error_text() {
        let notification = Notification::failure(MutationAction::Deactivate, "Benefit 9 not found");
        assert!(notification.is_failure());
        assert_eq!(
            notification.to_string(),
            "Failed to deactivate benefit: Benefit 9 not found"
        );
    }
}
