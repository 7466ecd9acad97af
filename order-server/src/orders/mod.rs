//! Order lifecycle
//!
//! ```text
//! HTTP handler → OrderService → OrderStore
//!                     ↓
//!               Notifier (spawned, best-effort)
//! ```

pub mod service;

pub use service::OrderService;
