use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::order::{Order, OrderStatus};
use crate::domain::table::{Table, TableStatus};

/// How many entries the best-seller list keeps.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Analytics shown on the dashboard page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Length of the reporting window in days.
    pub days: u32,
    pub order_count: usize,
    /// Revenue of all non-cancelled orders.
    pub revenue_cents: i64,
    /// Average non-cancelled order value, rounded down.
    pub average_ticket_cents: i64,
    pub orders_by_status: BTreeMap<String, usize>,
    pub top_products: Vec<ProductSales>,
    pub revenue_by_day: Vec<DailyRevenue>,
    pub tables: TableOccupancy,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub order_count: usize,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct TableOccupancy {
    pub total: usize,
    pub free: usize,
    pub occupied: usize,
    pub reserved: usize,
}

impl DashboardSummary {
    /// Aggregate orders of the reporting window and the current table states.
    pub fn compute(days: u32, orders: &[Order], tables: &[Table]) -> Self {
        let mut orders_by_status: BTreeMap<String, usize> = BTreeMap::new();
        let mut revenue_cents: i64 = 0;
        let mut billable = 0usize;
        let mut products: HashMap<String, (i64, i64)> = HashMap::new();
        let mut daily: BTreeMap<NaiveDate, (usize, i64)> = BTreeMap::new();

        for order in orders {
            *orders_by_status
                .entry(order.status.as_str().to_string())
                .or_default() += 1;

            if order.status == OrderStatus::Cancelled {
                continue;
            }

            billable += 1;
            revenue_cents = revenue_cents.saturating_add(order.total_cents);

            let day = daily.entry(order.created_at.date()).or_default();
            day.0 += 1;
            day.1 = day.1.saturating_add(order.total_cents);

            for item in &order.items {
                let entry = products.entry(item.name.clone()).or_default();
                entry.0 += i64::from(item.quantity);
                entry.1 = entry.1.saturating_add(item.line_total().unwrap_or(i64::MAX));
            }
        }

        let average_ticket_cents = match i64::try_from(billable) {
            Ok(count) if count > 0 => revenue_cents / count,
            _ => 0,
        };

        let mut top_products: Vec<ProductSales> = products
            .into_iter()
            .map(|(name, (quantity, revenue_cents))| ProductSales {
                name,
                quantity,
                revenue_cents,
            })
            .collect();
        top_products.sort_by(|a, b| {
            b.quantity
                .cmp(&a.quantity)
                .then(b.revenue_cents.cmp(&a.revenue_cents))
                .then(a.name.cmp(&b.name))
        });
        top_products.truncate(TOP_PRODUCTS_LIMIT);

        let revenue_by_day = daily
            .into_iter()
            .map(|(date, (order_count, revenue_cents))| DailyRevenue {
                date,
                order_count,
                revenue_cents,
            })
            .collect();

        let mut occupancy = TableOccupancy {
            total: tables.len(),
            ..TableOccupancy::default()
        };
        for table in tables {
            match table.status {
                TableStatus::Free => occupancy.free += 1,
                TableStatus::Occupied => occupancy.occupied += 1,
                TableStatus::Reserved => occupancy.reserved += 1,
            }
        }

        DashboardSummary {
            days,
            order_count: orders.len(),
            revenue_cents,
            average_ticket_cents,
            orders_by_status,
            top_products,
            revenue_by_day,
            tables: occupancy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderItem;
    use crate::domain::table::TableShape;
    use chrono::NaiveDateTime;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default()
    }

    fn item(name: &str, price_cents: i64, quantity: i32) -> OrderItem {
        OrderItem {
            product_id: None,
            name: name.to_string(),
            price_cents,
            quantity,
            notes: None,
        }
    }

    fn order(id: i32, status: OrderStatus, day: u32, items: Vec<OrderItem>) -> Order {
        let total_cents = items.iter().filter_map(OrderItem::line_total).sum();
        Order {
            id,
            hub_id: 1,
            table_id: None,
            customer_id: None,
            status,
            kitchen_position: 0,
            notes: None,
            total_cents,
            currency: "USD".to_string(),
            items,
            created_at: at(day),
            updated_at: at(day),
        }
    }

    fn table(id: i32, status: TableStatus) -> Table {
        Table {
            id,
            hub_id: 1,
            area_id: None,
            label: format!("T{id}"),
            seats: 4,
            shape: TableShape::Square,
            pos_x: 0,
            pos_y: 0,
            width: 80,
            height: 80,
            rotation: 0,
            status,
            created_at: at(1),
            updated_at: at(1),
        }
    }

    #[test]
    fn compute_excludes_cancelled_orders_from_revenue() {
        let orders = vec![
            order(1, OrderStatus::Served, 1, vec![item("Soup", 500, 2)]),
            order(2, OrderStatus::Pending, 2, vec![item("Tea", 200, 1)]),
            order(3, OrderStatus::Cancelled, 2, vec![item("Steak", 3000, 1)]),
        ];

        let summary = DashboardSummary::compute(7, &orders, &[]);

        assert_eq!(summary.order_count, 3);
        assert_eq!(summary.revenue_cents, 1200);
        assert_eq!(summary.average_ticket_cents, 600);
        assert_eq!(summary.orders_by_status.get("cancelled"), Some(&1));
        assert_eq!(summary.revenue_by_day.len(), 2);
        assert_eq!(summary.revenue_by_day[1].revenue_cents, 200);
        assert!(summary.top_products.iter().all(|p| p.name != "Steak"));
    }

    #[test]
    fn compute_ranks_top_products_by_quantity_then_revenue() {
        let orders = vec![
            order(1, OrderStatus::Served, 1, vec![item("Tea", 200, 3), item("Cake", 700, 3)]),
            order(2, OrderStatus::Ready, 1, vec![item("Soup", 500, 5)]),
        ];

        let summary = DashboardSummary::compute(1, &orders, &[]);

        let names: Vec<&str> = summary.top_products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Soup", "Cake", "Tea"]);
    }

    #[test]
    fn compute_counts_table_states() {
        let tables = vec![
            table(1, TableStatus::Free),
            table(2, TableStatus::Occupied),
            table(3, TableStatus::Occupied),
            table(4, TableStatus::Reserved),
        ];

        let summary = DashboardSummary::compute(7, &[], &tables);

        assert_eq!(summary.tables.total, 4);
        assert_eq!(summary.tables.occupied, 2);
        assert_eq!(summary.average_ticket_cents, 0);
    }
}
