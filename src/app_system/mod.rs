//! System orchestration: configuration, startup, seeding, tracing, and shutdown.

pub mod config;
pub mod order_system;
pub mod seed;
pub mod telemetry;

pub use config::*;
pub use order_system::*;
pub use seed::*;
pub use telemetry::*;
