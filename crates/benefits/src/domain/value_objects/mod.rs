//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod dialog;
mod notification;
mod phase;
mod violation;

pub use dialog::*;
pub use notification::*;
pub use phase::*;
pub use violation::*;
