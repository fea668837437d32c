//! Domain Services
//!
//! Stateless rules that do not belong to a single entity.

mod benefit_form;
mod transfer_validator;

pub use benefit_form::*;
pub use transfer_validator::*;
