//! Data models
//!
//! Shared between order-server and order-client (via API).

pub mod order;

// Re-exports
pub use order::*;
