use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use mb_common::Cents;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        OrderId        -------------------------------------------------------
/// The local order identifier, assigned by the database on insert. Its string form is what gets embedded in the
/// payment preference as the external reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub i64);

impl FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for OrderId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

//--------------------------------------      OrderStatus      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatus {
    /// The order has been created and no payment has been confirmed yet.
    Pending,
    /// Payment was approved; the order is being prepared for shipment.
    Processing,
    /// The order has been handed to the carrier. Advanced by admin action, not by this engine.
    Shipped,
    /// The order has been delivered. Advanced by admin action, not by this engine.
    Delivered,
    /// The payment was cancelled, rejected or refunded.
    Cancelled,
}

impl OrderStatus {
    /// True once payment has been received for the order. These states are a sink for the reconciler: no further
    /// status changes, stock adjustments or emails may be applied to such an order.
    pub fn payment_received(&self) -> bool {
        matches!(self, OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Delivered)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Processing => write!(f, "Processing"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Pending");
            OrderStatus::Pending
        })
    }
}

//--------------------------------------     PaymentEvent      -------------------------------------------------------
/// A payment status as reported by the processor.
///
/// The mapping to internal order statuses is:
///
/// | Processor status                  | Order status |
/// |-----------------------------------|--------------|
/// | approved                          | Processing   |
/// | in_process                        | Pending      |
/// | cancelled / rejected / refunded   | Cancelled    |
/// | anything else                     | Pending      |
///
/// Unrecognised statuses deliberately land on `Pending` so that an unknown event can never pay or cancel an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentEvent {
    Approved,
    InProcess,
    Cancelled,
    Rejected,
    Refunded,
    Other(String),
}

impl PaymentEvent {
    pub fn target_order_status(&self) -> OrderStatus {
        match self {
            PaymentEvent::Approved => OrderStatus::Processing,
            PaymentEvent::InProcess => OrderStatus::Pending,
            PaymentEvent::Cancelled | PaymentEvent::Rejected | PaymentEvent::Refunded => OrderStatus::Cancelled,
            PaymentEvent::Other(_) => OrderStatus::Pending,
        }
    }
}

impl<S: AsRef<str>> From<S> for PaymentEvent {
    fn from(value: S) -> Self {
        match value.as_ref() {
            "approved" => Self::Approved,
            "in_process" => Self::InProcess,
            "cancelled" => Self::Cancelled,
            "rejected" => Self::Rejected,
            "refunded" => Self::Refunded,
            s => Self::Other(s.to_string()),
        }
    }
}

impl Display for PaymentEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentEvent::Approved => write!(f, "approved"),
            PaymentEvent::InProcess => write!(f, "in_process"),
            PaymentEvent::Cancelled => write!(f, "cancelled"),
            PaymentEvent::Rejected => write!(f, "rejected"),
            PaymentEvent::Refunded => write!(f, "refunded"),
            PaymentEvent::Other(s) => write!(f, "{s}"),
        }
    }
}

//--------------------------------------        Order          -------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The buyer's user id, if the order was placed by a logged-in customer. Anonymous checkout leaves this unset.
    pub user_id: Option<i64>,
    pub total: Cents,
    pub status: OrderStatus,
    /// The processor's payment id, set once by the reconciler and never overwritten by a different payment id.
    pub external_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------       NewOrder        -------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: Option<i64>,
    pub total: Cents,
    pub items: Vec<NewOrderItem>,
    /// Used for the payment preference only. Not persisted; the confirmation email recipient comes from the
    /// processor's payment record at reconciliation time.
    pub buyer_email: Option<String>,
}

impl NewOrder {
    pub fn new(user_id: Option<i64>, total: Cents, items: Vec<NewOrderItem>) -> Self {
        Self { user_id, total, items, buyer_email: None }
    }

    pub fn with_buyer_email<S: Into<String>>(mut self, email: S) -> Self {
        self.buyer_email = Some(email.into());
        self
    }
}

//--------------------------------------      OrderItem        -------------------------------------------------------
/// A line item, created atomically with its order. Name and price are snapshots taken at order time so later
/// catalog edits cannot corrupt historical orders.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    /// The catalog product. Nullable because the product may be deleted after the order was placed.
    pub product_id: Option<i64>,
    pub product_name: String,
    pub price: Cents,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: Option<i64>,
    pub product_name: String,
    pub price: Cents,
    pub quantity: i64,
}

impl NewOrderItem {
    pub fn new<S: Into<String>>(product_id: Option<i64>, name: S, price: Cents, quantity: i64) -> Self {
        Self { product_id, product_name: name.into(), price, quantity }
    }
}

//--------------------------------------    StockDirection     -------------------------------------------------------
/// The direction of a stock adjustment derived from an order's line items. `Sale` is the confirmed-payment path;
/// `Reversal` restores stock and is reserved for a future refund flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDirection {
    Sale,
    Reversal,
}

impl StockDirection {
    /// The signed delta to apply for a line of `quantity` units.
    pub fn delta(&self, quantity: i64) -> i64 {
        match self {
            StockDirection::Sale => -quantity,
            StockDirection::Reversal => quantity,
        }
    }
}
