//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Delivery status of an order
///
/// The bot integration historically sent Spanish labels; they are still
/// accepted on input, output is always the snake_case form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "en camino")]
    EnRoute,
    #[serde(alias = "entregado")]
    Delivered,
}

impl OrderStatus {
    /// All statuses in lifecycle order
    pub const ALL: [OrderStatus; 3] = [Self::Pending, Self::EnRoute, Self::Delivered];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::EnRoute => "en_route",
            Self::Delivered => "delivered",
        }
    }

    /// Human-readable label for dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::EnRoute => "En route",
            Self::Delivered => "Delivered",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::EnRoute => 1,
            Self::Delivered => 2,
        }
    }

    /// Next status in the lifecycle, `None` once delivered
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Pending => Some(Self::EnRoute),
            Self::EnRoute => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// True if moving from `from` to `self` goes forward in the lifecycle
    /// (skips count as forward, staying put does not)
    pub fn is_forward_of(&self, from: OrderStatus) -> bool {
        self.rank() > from.rank()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" | "pendiente" => Ok(Self::Pending),
            "en_route" | "en camino" => Ok(Self::EnRoute),
            "delivered" | "entregado" => Ok(Self::Delivered),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub customer_name: String,
    pub contact_number: String,
    pub description: String,
    /// Amount in currency unit
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Create order payload
///
/// Every field is optional at the wire level so missing fields surface as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, alias = "nombre", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, alias = "numero", skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, alias = "pedido", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, alias = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl CreateOrderRequest {
    pub fn new(
        customer_name: impl Into<String>,
        contact_number: impl Into<String>,
        description: impl Into<String>,
        total: f64,
    ) -> Self {
        Self {
            id: None,
            customer_name: Some(customer_name.into()),
            contact_number: Some(contact_number.into()),
            description: Some(description.into()),
            total: Some(total),
            status: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Update order status payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default, alias = "estado", skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl UpdateStatusRequest {
    pub fn new(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
        }
    }
}
