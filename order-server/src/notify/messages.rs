//! Customer-facing message templates
//!
//! Customers are Spanish speaking, the texts are kept as sent by the bot.

use shared::models::{Order, OrderStatus};

/// Message for an order that just left the kitchen
pub fn en_route(customer_name: &str) -> String {
    format!("🚴‍♂️ ¡Hola {customer_name}! Tu pedido ya va en camino. Gracias por tu compra 🍔")
}

/// Message for a delivered order
pub fn delivered() -> String {
    "🎉 ¡Tu pedido ha sido entregado! Esperamos que lo hayas disfrutado 🍟".to_string()
}

/// Message to send when `order` has just entered its current status
///
/// Only `en_route` and `delivered` notify the customer.
pub fn for_status(order: &Order) -> Option<String> {
    match order.status {
        OrderStatus::Pending => None,
        OrderStatus::EnRoute => Some(en_route(&order.customer_name)),
        OrderStatus::Delivered => Some(delivered()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: 1,
            customer_name: "Ana".into(),
            contact_number: "5550001".into(),
            description: "2 burgers".into(),
            total: 12.5,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_has_no_message() {
        assert!(for_status(&order(OrderStatus::Pending)).is_none());
    }

    #[test]
    fn test_en_route_greets_customer() {
        let msg = for_status(&order(OrderStatus::EnRoute)).unwrap();
        assert!(msg.contains("Hola Ana"));
        assert!(msg.contains("en camino"));
    }

    #[test]
    fn test_delivered_message() {
        let msg = for_status(&order(OrderStatus::Delivered)).unwrap();
        assert!(msg.contains("entregado"));
    }
}
