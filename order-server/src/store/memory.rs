use std::collections::HashSet;

use parking_lot::Mutex;
use shared::models::{Order, OrderStatus};

use super::{NewOrder, OrderStore, StatusChange, StoreError, StoreResult};

/// Process-lifetime order store
///
/// Ids start at 1 and only grow. Every id ever handed out is remembered so
/// a deleted order's id is never issued again.
#[derive(Debug)]
pub struct InMemoryOrderStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    orders: Vec<Order>,
    next_id: u64,
    issued: HashSet<u64>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                orders: Vec::new(),
                next_id: 1,
                issued: HashSet::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    fn position(&self, id: u64) -> Option<usize> {
        self.orders.iter().position(|o| o.id == id)
    }

    fn allocate(&mut self, requested: Option<u64>) -> StoreResult<u64> {
        let id = match requested {
            // 0 is not a valid id; treat it as "not supplied"
            Some(id) if id != 0 => {
                let after = id.checked_add(1).ok_or(StoreError::IdOutOfRange(id))?;
                if self.issued.contains(&id) {
                    return Err(StoreError::IdInUse(id));
                }
                self.next_id = self.next_id.max(after);
                id
            }
            _ => {
                // Skip ids that were taken explicitly below the counter
                while self.issued.contains(&self.next_id) {
                    self.next_id = self.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
                }
                let id = self.next_id;
                self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
                id
            }
        };
        self.issued.insert(id);
        Ok(id)
    }
}

impl OrderStore for InMemoryOrderStore {
    fn list(&self) -> Vec<Order> {
        self.inner.lock().orders.clone()
    }

    fn insert(&self, order: NewOrder) -> StoreResult<Order> {
        let mut inner = self.inner.lock();
        let id = inner.allocate(order.id)?;
        let order = order.into_order(id);
        inner.orders.push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: u64) -> Option<Order> {
        let inner = self.inner.lock();
        inner.position(id).map(|idx| inner.orders[idx].clone())
    }

    fn update_status(&self, id: u64, status: OrderStatus) -> StoreResult<StatusChange> {
        let mut inner = self.inner.lock();
        let idx = inner.position(id).ok_or(StoreError::NotFound(id))?;
        let order = &mut inner.orders[idx];
        let previous = std::mem::replace(&mut order.status, status);
        Ok(StatusChange {
            previous,
            order: order.clone(),
        })
    }

    fn remove(&self, id: u64) -> StoreResult<Order> {
        let mut inner = self.inner.lock();
        let idx = inner.position(id).ok_or(StoreError::NotFound(id))?;
        Ok(inner.orders.remove(idx))
    }
}
