//! Order store entity: persistence rules and the approval state machine.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
