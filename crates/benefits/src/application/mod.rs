//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the benefit store and the view that presents its state.

mod orchestrator;

pub use orchestrator::{BenefitOrchestrator, Confirmed};
