//! Typed clients over the resource actors. [`OrderClient`] is the order
//! lifecycle engine; the others front the catalog and the session store.

#[macro_use]
mod macros;

pub mod order_client;
pub mod product_client;
pub mod session_client;

pub use order_client::*;
pub use product_client::*;
pub use session_client::*;
