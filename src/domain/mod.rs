pub mod identity;
pub mod order;
pub mod product;
pub mod session;

pub use identity::*;
pub use order::*;
pub use product::*;
pub use session::*;
