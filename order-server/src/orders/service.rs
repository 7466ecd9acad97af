//! Order service - validation and store orchestration
//!
//! Handlers stay thin; everything that decides whether a request is
//! acceptable lives here so it can be tested without HTTP.

use std::sync::Arc;

use chrono::Utc;
use shared::models::{CreateOrderRequest, Order, OrderStatus, UpdateStatusRequest};
use shared::{AppError, AppResult, ErrorCode};

use crate::notify::{Notifier, messages};
use crate::store::{NewOrder, OrderStore};

/// Order lifecycle operations
#[derive(Clone)]
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Full collection, insertion order
    pub fn list(&self) -> Vec<Order> {
        self.store.list()
    }

    /// Validate and store a new order
    pub fn create(&self, req: CreateOrderRequest) -> AppResult<Order> {
        let new_order = validate_create(req)?;
        let order = self.store.insert(new_order)?;

        tracing::info!(
            order_id = order.id,
            customer = %order.customer_name,
            total = order.total,
            status = %order.status,
            "Order received"
        );

        Ok(order)
    }

    /// Set the status of an existing order
    ///
    /// Any status is accepted, including moving backwards. A change into
    /// `en_route` or `delivered` triggers a customer notification.
    pub fn update_status(&self, id: u64, req: UpdateStatusRequest) -> AppResult<Order> {
        let status = req.status.ok_or_else(|| {
            AppError::with_message(ErrorCode::RequiredField, "Status is required")
                .with_detail("fields", vec!["status"])
        })?;

        // previous status comes from the same write, so concurrent updates
        // to one status see exactly one change
        let change = self.store.update_status(id, status)?;
        let previous = change.previous;

        if previous != status && !status.is_forward_of(previous) {
            tracing::warn!(
                order_id = id,
                from = %previous,
                to = %status,
                "Order status moved backwards"
            );
        } else {
            tracing::info!(order_id = id, from = %previous, to = %status, "Order status updated");
        }

        if change.changed() {
            self.spawn_notification(&change.order);
        }

        Ok(change.order)
    }

    /// Remove an order
    pub fn delete(&self, id: u64) -> AppResult<Order> {
        let order = self.store.remove(id)?;
        tracing::info!(order_id = id, "Order deleted");
        Ok(order)
    }

    /// Fire-and-forget customer notification for the order's current status
    fn spawn_notification(&self, order: &Order) {
        let Some(message) = messages::for_status(order) else {
            return;
        };

        let notifier = self.notifier.clone();
        let order_id = order.id;
        let number = order.contact_number.clone();
        let status = order.status;

        tokio::spawn(async move {
            match notifier.send(&number, &message).await {
                Ok(delivery) => {
                    tracing::info!(order_id, %status, upstream_status = delivery.status, "Customer notified");
                }
                Err(e) => {
                    tracing::warn!(
                        order_id,
                        %status,
                        upstream_status = ?e.status(),
                        error = %e,
                        "Customer notification failed"
                    );
                }
            }
        });
    }
}

/// Check required fields and turn the request into a storable order
fn validate_create(req: CreateOrderRequest) -> AppResult<NewOrder> {
    fn required(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.is_empty())
    }

    let customer_name = required(req.customer_name);
    let contact_number = required(req.contact_number);
    let description = required(req.description);

    let missing: Vec<&str> = [
        ("customerName", customer_name.is_none()),
        ("contactNumber", contact_number.is_none()),
        ("description", description.is_none()),
        ("total", req.total.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, is_missing)| is_missing.then_some(field))
    .collect();

    let (Some(customer_name), Some(contact_number), Some(description), Some(total)) =
        (customer_name, contact_number, description, req.total)
    else {
        return Err(AppError::validation("Missing required fields").with_detail("fields", missing));
    };

    if !total.is_finite() || total < 0.0 {
        return Err(
            AppError::with_message(ErrorCode::ValueOutOfRange, "Total must be a non-negative amount")
                .with_detail("fields", vec!["total"]),
        );
    }

    Ok(NewOrder {
        id: req.id,
        customer_name,
        contact_number,
        description,
        total,
        status: req.status.unwrap_or(OrderStatus::Pending),
        created_at: Utc::now(),
    })
}
