//! Benefits Domain Library
//!
//! Core types and client-side orchestration for benefit accounts: named
//! monetary allowances whose balances can be moved between one another.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Benefit, TransferRequest, MutationRequest
//!   - `value_objects/`: Violations, dialog outcomes, notifications
//!   - `services/`: Transfer validation and form construction
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `BenefitStore`: the backing store behind the HTTP boundary
//!
//! - **Application** (`application/`): The mutation orchestrator that owns
//!   the current view's snapshot
//!
//! - **Adapters** (`adapters/`): An in-memory store with the authoritative
//!   server rules
//!
//! # Usage
//!
//! ```rust,ignore
//! use benefits::{BenefitOrchestrator, InMemoryBenefitStore};
//!
//! let (orchestrator, mut notifications) =
//!     BenefitOrchestrator::new(Arc::new(InMemoryBenefitStore::new()));
//! orchestrator.load_all().await?;
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::InMemoryBenefitStore;
pub use application::{BenefitOrchestrator, Confirmed};
pub use domain::{
    build_mutation_request, check_destination, destination_candidates, validate_transfer,
    Benefit, BenefitDraft, BenefitId, DialogResult, DomainError, FormViolation, MutationAction,
    MutationPhase, MutationRequest, Notification, TransferRequest, TransferValidation,
    TransferViolation,
};
pub use ports::BenefitStore;
