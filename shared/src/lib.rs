//! Shared types for the order dashboard
//!
//! Common types used by both the server and the client crates: the order
//! model, request payloads, error codes and the response envelope.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{CreateOrderRequest, Order, OrderStatus, UpdateStatusRequest};
