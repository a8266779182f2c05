use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::order::OrderStatus;
use crate::forms::optional_multiline;

const NOTES_MAX_LEN_VALIDATOR: u64 = 1024;
const MAX_QUANTITY: i32 = 999;
const MAX_ITEMS: u64 = 200;

pub type OrderFormResult<T> = Result<T, OrderFormError>;

#[derive(Debug, Error)]
pub enum OrderFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("order must contain at least one item")]
    NoItems,
    #[error("unknown order status `{value}`")]
    InvalidStatus { value: String },
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderItemForm {
    #[validate(range(min = 1))]
    pub product_id: i32,
    #[validate(range(min = 1, max = MAX_QUANTITY))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[validate(length(max = NOTES_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Order placed from the POS screen.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderForm {
    #[serde(default)]
    pub table_id: Option<i32>,
    #[serde(default)]
    pub customer_id: Option<i32>,
    #[validate(length(max = NOTES_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub notes: Option<String>,
    #[validate(length(max = MAX_ITEMS), nested)]
    pub items: Vec<OrderItemForm>,
}

/// Line requested by the client before the product is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedItem {
    pub product_id: i32,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Sanitised order request; products are resolved by the service.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub table_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub notes: Option<String>,
    pub items: Vec<RequestedItem>,
}

impl CreateOrderForm {
    /// Validate the payload. Lines for the same product without notes are merged.
    pub fn into_order_request(self) -> OrderFormResult<OrderRequest> {
        self.validate()?;

        if self.items.is_empty() {
            return Err(OrderFormError::NoItems);
        }

        let mut items: Vec<RequestedItem> = Vec::with_capacity(self.items.len());
        let mut plain_lines: BTreeMap<i32, usize> = BTreeMap::new();

        for item in self.items {
            let notes = optional_multiline(item.notes.as_deref());
            if notes.is_none() {
                if let Some(index) = plain_lines.get(&item.product_id) {
                    let line = &mut items[*index];
                    line.quantity = line.quantity.saturating_add(item.quantity);
                    continue;
                }
                plain_lines.insert(item.product_id, items.len());
            }
            items.push(RequestedItem {
                product_id: item.product_id,
                quantity: item.quantity,
                notes,
            });
        }

        Ok(OrderRequest {
            table_id: self.table_id,
            customer_id: self.customer_id,
            notes: optional_multiline(self.notes.as_deref()),
            items,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusForm {
    pub status: String,
}

impl OrderStatusForm {
    pub fn into_status(self) -> OrderFormResult<OrderStatus> {
        parse_status(self.status)
    }
}

/// Drag-and-drop move on the kitchen board.
#[derive(Debug, Deserialize)]
pub struct MoveOrderForm {
    pub status: String,
    /// Zero-based target index; values past the end append.
    #[serde(default)]
    pub position: usize,
}

impl MoveOrderForm {
    pub fn into_move(self) -> OrderFormResult<(OrderStatus, usize)> {
        let position = self.position;
        Ok((parse_status(self.status)?, position))
    }
}

fn parse_status(value: String) -> OrderFormResult<OrderStatus> {
    OrderStatus::parse(&value).ok_or(OrderFormError::InvalidStatus { value })
}
