use std::sync::Arc;
use std::time::Instant;

use crate::core::{Config, Result};
use crate::notify::{BuilderBotNotifier, Notifier};
use crate::orders::OrderService;
use crate::store::{InMemoryOrderStore, OrderStore};

/// Server state - shared handles for every request
///
/// Cheap to clone: every field is behind an `Arc`.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Immutable configuration |
/// | orders | Order lifecycle service (store + notifier) |
/// | started_at | Process start, for uptime reporting |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub orders: OrderService,
    pub started_at: Instant,
}

impl ServerState {
    /// Assemble state from explicit parts
    ///
    /// Tests use this to inject a fake store or notifier.
    pub fn new(config: Config, store: Arc<dyn OrderStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            orders: OrderService::new(store, notifier),
            started_at: Instant::now(),
        }
    }

    /// Production wiring: in-memory store and BuilderBot notifier
    pub fn initialize(config: &Config) -> Result<Self> {
        let notifier = BuilderBotNotifier::new(&config.notifier)?;
        tracing::info!(
            environment = %config.environment,
            notifications = config.notifier.has_credentials(),
            "Server state initialized"
        );
        Ok(Self::new(
            config.clone(),
            Arc::new(InMemoryOrderStore::new()),
            Arc::new(notifier),
        ))
    }

    /// Seconds since startup
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
