//! Order API clients
//!
//! - [`HttpClient`] - JSON transport seam
//! - [`NetworkHttpClient`] - reqwest transport
//! - [`OneshotHttpClient`] - in-memory transport (feature `in-process`)
//! - [`OrdersApi`] / [`OrdersClient`] - typed order endpoints

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;
pub mod orders;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
pub use orders::{OrdersApi, OrdersClient};
