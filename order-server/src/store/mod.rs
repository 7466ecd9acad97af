//! Order storage
//!
//! [`OrderStore`] is the seam between the request handlers and the
//! authoritative order collection. The server ships an in-memory
//! implementation ([`InMemoryOrderStore`]); tests may plug their own.

mod memory;

pub use memory::InMemoryOrderStore;

use chrono::{DateTime, Utc};
use shared::models::{Order, OrderStatus};
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Store-level failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("order {0} not found")]
    NotFound(u64),

    #[error("order id {0} has already been issued")]
    IdInUse(u64),

    /// The counter must be able to move past the id
    #[error("order id {0} is out of range")]
    IdOutOfRange(u64),

    #[error("order ids exhausted")]
    IdsExhausted,
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AppError::order_not_found(id),
            StoreError::IdInUse(id) => {
                AppError::with_message(ErrorCode::OrderIdInUse, format!("Order id {id} is already in use"))
                    .with_detail("id", id)
            }
            StoreError::IdOutOfRange(id) => AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("Order id must be below {}", u64::MAX),
            )
            .with_detail("id", id),
            StoreError::IdsExhausted => AppError::internal("Order ids exhausted"),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of a status overwrite: the order as stored now and the status it
/// had just before, read under the same lock
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub previous: OrderStatus,
    pub order: Order,
}

impl StatusChange {
    pub fn changed(&self) -> bool {
        self.previous != self.order.status
    }
}

/// A validated order that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Explicit id requested by the caller, `None` lets the store pick
    pub id: Option<u64>,
    pub customer_name: String,
    pub contact_number: String,
    pub description: String,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl NewOrder {
    pub(crate) fn into_order(self, id: u64) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            contact_number: self.contact_number,
            description: self.description,
            total: self.total,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Authoritative order collection
///
/// Every method completes without suspending, so one call is one atomic
/// mutation from the point of view of concurrent requests.
pub trait OrderStore: Send + Sync {
    /// All orders, insertion order
    fn list(&self) -> Vec<Order>;

    /// Append an order, assigning the next id when none was requested
    fn insert(&self, order: NewOrder) -> StoreResult<Order>;

    fn find_by_id(&self, id: u64) -> Option<Order>;

    /// Overwrite the status; no transition rules are applied here
    fn update_status(&self, id: u64, status: OrderStatus) -> StoreResult<StatusChange>;

    /// Remove and return the order
    fn remove(&self, id: u64) -> StoreResult<Order>;
}
