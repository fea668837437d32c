//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with external systems.
//!
//! Implementations of these traits live in the adapter layer
//! (`adapters/` here, the HTTP client in the CLI crate).

mod benefit_store;

// Re-exports
pub use benefit_store::*;
