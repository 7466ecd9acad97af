//! Order Client - dashboard side of the order API
//!
//! # Layers
//!
//! ```text
//! DashboardView  (dashboard) - counts, rows, action gating, text table
//!      ▲
//! OrderSync      (sync)      - polling loop, status changes, local state
//!      ▲
//! OrdersApi      (client)    - typed endpoints over an HttpClient
//!      ▲
//! NetworkHttpClient | OneshotHttpClient
//! ```
//!
//! # Example
//!
//! ```ignore
//! let config = ClientConfig::new("http://localhost:8080");
//! let api = OrdersClient::new(NetworkHttpClient::new(&config)?);
//! let sync = OrderSync::from_config(api, &config);
//! let _handle = sync.start();
//! println!("{}", DashboardView::from_state(&sync.snapshot()));
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod sync;

pub use client::{HttpClient, NetworkHttpClient, OrdersApi, OrdersClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use dashboard::{DashboardView, OrderRow, StatusCounts};
pub use error::{ClientError, ClientResult};
pub use sync::{OrderSync, SyncHandle, SyncState};

// Re-export shared types for convenience
pub use shared::models::{CreateOrderRequest, Order, OrderStatus, UpdateStatusRequest};
