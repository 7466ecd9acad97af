//! Core module - configuration, state, server and bootstrap errors
//!
//! - [`Config`] - server configuration
//! - [`ServerState`] - shared request state
//! - [`Server`] - HTTP server
//! - [`ServerError`] - bootstrap errors

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Config, NotifierConfig};
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
