//! Domain Entities
//!
//! Structural contracts shared with the store collaborator.
//! - Benefit: A named monetary allowance
//! - TransferRequest: Intent to move value between two benefits
//! - MutationRequest: Create/update payload

mod benefit;
mod mutation;
mod transfer;

pub use benefit::*;
pub use mutation::*;
pub use transfer::*;
