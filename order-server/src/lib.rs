//! Order Server - order intake and tracking API
//!
//! Receives orders from the WhatsApp bot, keeps them in memory and lets the
//! dashboard move them through `pending -> en_route -> delivered`. Status
//! changes notify the customer through the messaging API.
//!
//! # Modules
//!
//! - [`core`] - configuration, state, server
//! - [`store`] - order storage
//! - [`orders`] - validation and lifecycle service
//! - [`notify`] - customer notifications
//! - [`api`] - HTTP handlers
//! - [`routes`] - router and middleware assembly
//! - [`utils`] - logging

pub mod api;
pub mod core;
pub mod notify;
pub mod orders;
pub mod routes;
pub mod store;
pub mod utils;

pub use crate::core::{Config, NotifierConfig, Server, ServerError, ServerState};
pub use notify::{BuilderBotNotifier, Notifier, NotifyError};
pub use orders::OrderService;
pub use routes::{build_app, build_router};
pub use store::{InMemoryOrderStore, NewOrder, OrderStore, StatusChange, StoreError};
pub use utils::{init_logger, init_logger_with_file};
