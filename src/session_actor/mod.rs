//! Identity collaborator: issued sessions keyed by their credential.

pub mod entity;
pub mod error;

pub use error::*;
