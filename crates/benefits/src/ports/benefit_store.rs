//! Benefit Store Port
//!
//! Abstract interface for the backing store behind the HTTP boundary.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Benefit, BenefitId, MutationRequest, TransferRequest};

/// Store collaborator consumed by the orchestrator.
///
/// Every operation either resolves with data or fails with a
/// [`DomainError`] whose text is shown to the user as-is.
#[async_trait]
pub trait BenefitStore: Send + Sync {
    /// All benefits, active and inactive, in store order
    async fn list_all(&self) -> Result<Vec<Benefit>, DomainError>;

    /// Benefits with `active = true`, in store order
    async fn list_active(&self) -> Result<Vec<Benefit>, DomainError>;

    /// Find a benefit by ID
    async fn get_by_id(&self, id: BenefitId) -> Result<Benefit, DomainError>;

    /// Create a benefit; the store assigns the id
    async fn create(&self, request: &MutationRequest) -> Result<Benefit, DomainError>;

    /// Replace the mutable fields of an existing benefit
    async fn update(&self, id: BenefitId, request: &MutationRequest)
        -> Result<Benefit, DomainError>;

    /// Mark a benefit inactive
    async fn deactivate(&self, id: BenefitId) -> Result<(), DomainError>;

    /// Move value between two benefits
    async fn transfer(&self, request: &TransferRequest) -> Result<(), DomainError>;
}
