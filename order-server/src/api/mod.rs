//! API routes
//!
//! - [`orders`] - order CRUD (`/api/orders`, alias `/api/pedidos`)
//! - [`health`] - liveness and ping

pub mod health;
pub mod orders;
