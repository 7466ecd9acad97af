//! Dashboard view model
//!
//! Everything here is derived from a [`SyncState`] snapshot; nothing is
//! stored. `Display` on [`DashboardView`] renders a plain-text table for
//! terminals and logs.

use std::fmt;

use chrono::{DateTime, Utc};
use shared::models::{Order, OrderStatus};

use crate::sync::SyncState;

/// Longest description shown before truncation
const DESCRIPTION_WIDTH: usize = 32;

/// Orders per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub en_route: usize,
    pub delivered: usize,
}

impl StatusCounts {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut counts, order| {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::EnRoute => counts.en_route += 1,
                OrderStatus::Delivered => counts.delivered += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::EnRoute => self.en_route,
            OrderStatus::Delivered => self.delivered,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.en_route + self.delivered
    }
}

/// One table row with its action availability
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: u64,
    pub customer: String,
    pub number: String,
    pub description: String,
    pub status: OrderStatus,
    /// `$` amount with two decimals
    pub total: String,
    /// "Mark en route" is enabled
    pub can_mark_en_route: bool,
    /// "Mark delivered" is enabled
    pub can_mark_delivered: bool,
}

impl OrderRow {
    /// Actions are disabled while a list fetch or a change for this order is
    /// outstanding
    pub fn new(order: &Order, is_loading: bool, is_updating: bool) -> Self {
        let idle = !is_loading && !is_updating;
        Self {
            id: order.id,
            customer: order.customer_name.clone(),
            number: order.contact_number.clone(),
            description: order.description.clone(),
            status: order.status,
            total: format_total(order.total),
            can_mark_en_route: idle && order.status == OrderStatus::Pending,
            can_mark_delivered: idle && order.status != OrderStatus::Delivered,
        }
    }

    /// `#12`
    pub fn label(&self) -> String {
        format!("#{}", self.id)
    }

    pub fn badge(&self) -> &'static str {
        self.status.label()
    }
}

pub fn format_total(total: f64) -> String {
    format!("${total:.2}")
}

/// Full dashboard screen
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub counts: StatusCounts,
    pub rows: Vec<OrderRow>,
    pub error: Option<String>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub is_loading: bool,
}

impl DashboardView {
    pub fn from_state(state: &SyncState) -> Self {
        Self {
            counts: StatusCounts::from_orders(&state.orders),
            rows: state
                .orders
                .iter()
                .map(|o| OrderRow::new(o, state.is_loading(), state.is_updating(o.id)))
                .collect(),
            error: state.error.clone(),
            last_refresh: state.last_refresh,
            is_loading: state.is_loading(),
        }
    }

    pub fn total_orders(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, id: u64) -> Option<&OrderRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            writeln!(f, "Error: {error}")?;
        }

        writeln!(
            f,
            "Orders: {} | Pending: {} | En route: {} | Delivered: {}",
            self.total_orders(),
            self.counts.pending,
            self.counts.en_route,
            self.counts.delivered
        )?;

        match self.last_refresh {
            Some(at) => write!(f, "Last refresh: {}", at.format("%H:%M:%S UTC"))?,
            None => write!(f, "Last refresh: never")?,
        }
        if self.is_loading {
            write!(f, " (refreshing)")?;
        }
        writeln!(f)?;

        if self.is_empty() {
            return writeln!(f, "No orders yet");
        }

        let cells: Vec<[String; 6]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.label(),
                    r.customer.clone(),
                    r.number.clone(),
                    truncate(&r.description, DESCRIPTION_WIDTH),
                    r.total.clone(),
                    r.badge().to_string(),
                ]
            })
            .collect();

        let header = ["ID", "Customer", "Number", "Description", "Total", "Status"];
        let mut widths = header.map(|h| h.chars().count());
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let write_line = |f: &mut fmt::Formatter<'_>, line: &[String]| -> fmt::Result {
            let padded: Vec<String> = line
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect();
            writeln!(f, "{}", padded.join("  ").trim_end())
        };

        write_line(f, &header.map(String::from))?;
        for row in &cells {
            write_line(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: u64, status: OrderStatus) -> Order {
        Order {
            id,
            customer_name: "Ana".into(),
            contact_number: "5550001".into(),
            description: "2 burgers".into(),
            total: 12.5,
            status,
            created_at: Utc::now(),
        }
    }

    fn state(orders: Vec<Order>) -> SyncState {
        SyncState {
            orders,
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_follow_orders() {
        let orders = vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Pending),
            order(3, OrderStatus::EnRoute),
            order(4, OrderStatus::Delivered),
        ];
        let counts = StatusCounts::from_orders(&orders);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.get(OrderStatus::EnRoute), 1);
        assert_eq!(counts.delivered, 1);
        assert_eq!(counts.total(), orders.len());
    }

    #[test]
    fn test_row_gating_by_status() {
        let pending = OrderRow::new(&order(1, OrderStatus::Pending), false, false);
        assert!(pending.can_mark_en_route);
        assert!(pending.can_mark_delivered);

        let en_route = OrderRow::new(&order(2, OrderStatus::EnRoute), false, false);
        assert!(!en_route.can_mark_en_route);
        assert!(en_route.can_mark_delivered);

        let delivered = OrderRow::new(&order(3, OrderStatus::Delivered), false, false);
        assert!(!delivered.can_mark_en_route);
        assert!(!delivered.can_mark_delivered);
    }

    #[test]
    fn test_loading_or_in_flight_disables_actions() {
        let loading = OrderRow::new(&order(1, OrderStatus::Pending), true, false);
        assert!(!loading.can_mark_en_route && !loading.can_mark_delivered);

        let mut s = state(vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Pending)]);
        s.in_flight.insert(1, 2);
        let view = DashboardView::from_state(&s);
        assert!(!view.row(1).unwrap().can_mark_en_route);
        assert!(view.row(2).unwrap().can_mark_en_route);

        s.loading = 1;
        let view = DashboardView::from_state(&s);
        assert!(view.is_loading);
        assert!(!view.row(2).unwrap().can_mark_en_route);
        assert!(view.to_string().contains("(refreshing)"));
    }

    #[test]
    fn test_row_formatting() {
        let row = OrderRow::new(&order(7, OrderStatus::EnRoute), false, false);
        assert_eq!(row.label(), "#7");
        assert_eq!(row.total, "$12.50");
        assert_eq!(row.badge(), "En route");
        assert_eq!(format_total(3.0), "$3.00");
    }

    #[test]
    fn test_empty_state() {
        let view = DashboardView::from_state(&SyncState::default());
        assert_eq!(view.total_orders(), 0);
        let text = view.to_string();
        assert!(text.contains("No orders yet"));
        assert!(text.contains("Last refresh: never"));
    }

    #[test]
    fn test_table_and_error_banner() {
        let mut s = state(vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Delivered)]);
        s.error = Some("HTTP error: connection refused".into());
        let text = DashboardView::from_state(&s).to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Error: HTTP error: connection refused");
        assert_eq!(lines[1], "Orders: 2 | Pending: 1 | En route: 0 | Delivered: 1");
        assert!(lines[3].starts_with("ID"));
        assert!(lines[4].starts_with("#1"));
        assert!(lines[4].ends_with("Pending"));
        assert!(lines[5].contains("$12.50"));
    }

    #[test]
    fn test_long_description_truncated() {
        let mut o = order(1, OrderStatus::Pending);
        o.description = "x".repeat(100);
        let text = DashboardView::from_state(&state(vec![o])).to_string();
        assert!(text.contains(&format!("{}...", "x".repeat(DESCRIPTION_WIDTH - 3))));
        assert!(!text.contains(&"x".repeat(DESCRIPTION_WIDTH + 1)));
    }
}
