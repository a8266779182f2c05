use chrono::{Local, NaiveDateTime};
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Lifecycle states of a kitchen order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order was taken and waits for the kitchen.
    #[default]
    Pending,
    /// Kitchen is cooking the order.
    Preparing,
    /// Order is plated and waits to be served.
    Ready,
    /// Order reached the guest.
    Served,
    /// Order was cancelled and will not be prepared.
    Cancelled,
}

impl OrderStatus {
    /// Columns shown on the kitchen board, left to right.
    pub const KANBAN: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "preparing" => Some(OrderStatus::Preparing),
            "ready" => Some(OrderStatus::Ready),
            "served" => Some(OrderStatus::Served),
            "cancelled" | "canceled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether orders in this status appear on the kitchen board.
    pub fn is_kanban(self) -> bool {
        Self::KANBAN.contains(&self)
    }

    /// Served and cancelled orders never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Served | OrderStatus::Cancelled)
    }

    /// Whether an order may move from `self` to `next`.
    ///
    /// Kitchen staff drag cards freely between the board columns, a ready
    /// order can be served and anything still open can be cancelled.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready => true,
            OrderStatus::Served => self == OrderStatus::Ready,
            OrderStatus::Cancelled => true,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Order placed for a table or a customer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i32,
    pub hub_id: i32,
    /// Table the order is served at.
    pub table_id: Option<i32>,
    /// Customer the order is billed to.
    pub customer_id: Option<i32>,
    pub status: OrderStatus,
    /// Zero-based position inside the kitchen board column.
    pub kitchen_position: i32,
    pub notes: Option<String>,
    /// Total amount represented in the smallest currency unit.
    pub total_cents: i64,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Snapshot of a product on an order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Source product; cleared when the product is deleted later.
    pub product_id: Option<i32>,
    pub name: String,
    /// Unit price at the time of ordering.
    pub price_cents: i64,
    pub quantity: i32,
    /// Kitchen instructions such as "no onions".
    pub notes: Option<String>,
}

impl OrderItem {
    /// Price of the line, `None` on overflow.
    pub fn line_total(&self) -> Option<i64> {
        self.price_cents.checked_mul(i64::from(self.quantity))
    }
}

/// Payload required to insert a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub hub_id: i32,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub notes: Option<String>,
    pub total_cents: i64,
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub updated_at: NaiveDateTime,
}

impl NewOrder {
    /// Build an order from its items; fails when the total overflows.
    pub fn new(hub_id: i32, currency: impl Into<String>, items: Vec<OrderItem>) -> Option<Self> {
        let total_cents = order_total(&items)?;
        Some(Self {
            hub_id,
            table_id: None,
            customer_id: None,
            notes: None,
            total_cents,
            currency: currency.into(),
            items,
            updated_at: Local::now().naive_utc(),
        })
    }

    pub fn with_table_id(mut self, table_id: i32) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn with_customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Query definition used to list orders for a hub.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub hub_id: i32,
    /// Restrict to any of these statuses.
    pub statuses: Option<Vec<OrderStatus>>,
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    /// Only orders created at or after this instant.
    pub created_after: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            statuses: None,
            table_id: None,
            customer_id: None,
            created_after: None,
            pagination: None,
        }
    }

    pub fn status(self, status: OrderStatus) -> Self {
        self.statuses([status])
    }

    pub fn statuses(mut self, statuses: impl Into<Vec<OrderStatus>>) -> Self {
        self.statuses = Some(statuses.into());
        self
    }

    pub fn table_id(mut self, table_id: i32) -> Self {
        self.table_id = Some(table_id);
        self
    }

    pub fn customer_id(mut self, customer_id: i32) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn created_after(mut self, instant: NaiveDateTime) -> Self {
        self.created_after = Some(instant);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Kitchen board grouped by column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KitchenBoard {
    pub pending: Vec<Order>,
    pub preparing: Vec<Order>,
    pub ready: Vec<Order>,
}

impl KitchenBoard {
    /// Group orders into columns, each sorted by board position then age.
    /// Orders outside the board statuses are skipped.
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let mut board = KitchenBoard::default();
        for order in orders {
            match order.status {
                OrderStatus::Pending => board.pending.push(order),
                OrderStatus::Preparing => board.preparing.push(order),
                OrderStatus::Ready => board.ready.push(order),
                OrderStatus::Served | OrderStatus::Cancelled => {}
            }
        }
        for column in [&mut board.pending, &mut board.preparing, &mut board.ready] {
            column.sort_by(|a, b| {
                a.kitchen_position
                    .cmp(&b.kitchen_position)
                    .then(a.created_at.cmp(&b.created_at))
                    .then(a.id.cmp(&b.id))
            });
        }
        board
    }
}

/// Sum of all line totals, `None` on overflow.
pub fn order_total(items: &[OrderItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, item| acc.checked_add(item.line_total()?))
}

/// Place `order_id` at `position` inside an ordered column of ids.
///
/// The id is removed first if already present, so moving within a column
/// works the same as moving in from elsewhere. Positions past the end append.
pub fn reorder_column(column: &[i32], order_id: i32, position: usize) -> Vec<i32> {
    let mut ids: Vec<i32> = column.iter().copied().filter(|id| *id != order_id).collect();
    let index = position.min(ids.len());
    ids.insert(index, order_id);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price_cents: i64, quantity: i32) -> OrderItem {
        OrderItem {
            product_id: Some(1),
            name: "Soup".to_string(),
            price_cents,
            quantity,
            notes: None,
        }
    }

    #[test]
    fn kanban_moves_are_free_but_terminal_states_are_final() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Ready));
        assert!(Ready.can_transition_to(Pending));
        assert!(Preparing.can_transition_to(Cancelled));
        assert!(Ready.can_transition_to(Served));
        assert!(!Pending.can_transition_to(Served));
        assert!(!Served.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Ready));
    }

    #[test]
    fn status_parsing_accepts_american_spelling() {
        assert_eq!(OrderStatus::parse("Canceled"), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::parse("done"), None);
    }

    #[test]
    fn order_total_sums_lines_and_detects_overflow() {
        assert_eq!(order_total(&[item(250, 2), item(100, 3)]), Some(800));
        assert_eq!(order_total(&[]), Some(0));
        assert_eq!(order_total(&[item(i64::MAX, 2)]), None);
        assert!(NewOrder::new(1, "USD", vec![item(i64::MAX, 1), item(1, 1)]).is_none());
    }

    #[test]
    fn reorder_column_moves_within_column() {
        assert_eq!(reorder_column(&[1, 2, 3, 4], 4, 0), vec![4, 1, 2, 3]);
        assert_eq!(reorder_column(&[1, 2, 3, 4], 1, 2), vec![2, 3, 1, 4]);
    }

    #[test]
    fn reorder_column_inserts_and_clamps() {
        assert_eq!(reorder_column(&[1, 2], 9, 1), vec![1, 9, 2]);
        assert_eq!(reorder_column(&[1, 2], 9, 42), vec![1, 2, 9]);
        assert_eq!(reorder_column(&[], 9, 3), vec![9]);
    }
}
