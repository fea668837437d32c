//! Adapters
//!
//! Concrete implementations of the ports that need no network.

mod memory;

pub use memory::InMemoryBenefitStore;
