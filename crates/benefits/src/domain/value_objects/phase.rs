//! MutationPhase - Lifecycle of a single mutating call

use serde::{Deserialize, Serialize};

/// `Idle → Validating (transfer only) → Submitting → {Succeeded → Refreshing → Idle | Failed → Idle}`
///
/// Create, update and deactivate stay in `Submitting` through their reload
/// and return straight to `Idle`; only transfer exposes `Succeeded` and
/// `Refreshing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Refreshing,
    Failed,
}

impl MutationPhase {
    /// Whether `next` may follow this phase
    pub fn can_transition_to(self, next: MutationPhase) -> bool {
        use MutationPhase::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Idle, Submitting)
                | (Validating, Submitting)
                | (Validating, Idle)
                | (Submitting, Idle)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Succeeded, Refreshing)
                | (Refreshing, Idle)
                | (Failed, Idle)
        )
    }
}

impl std::fmt::Display for MutationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationPhase::Idle => write!(f, "idle"),
            MutationPhase::Validating => write!(f, "validating"),
            MutationPhase::Submitting => write!(f, "submitting"),
            MutationPhase::Succeeded => write!(f, "succeeded"),
            MutationPhase::Refreshing => write!(f, "refreshing"),
            MutationPhase::Failed => write!(f, "failed"),
        }
    }
}
