//! Catalog and stock ledger: product entity logic and its stock actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
