//! Blog backend library: domain model, ports, adapters, and HTTP surface.
//!
//! The binary in `main.rs` wires these together; integration tests drive
//! the Diesel adapters directly.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::Trace;
