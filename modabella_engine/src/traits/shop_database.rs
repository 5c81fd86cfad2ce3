use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderId, OrderItem, OrderStatus, StockDirection};

/// The persistence contract for the order/payment reconciliation flow.
///
/// This behaviour includes:
/// * Creating pending orders together with their line items in one atomic unit of work.
/// * Reading back orders and their items.
/// * The guarded status transition used by the webhook reconciler.
#[allow(async_fn_in_trait)]
pub trait ShopDatabase: Clone {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Inserts the order and all of its line items in a single transaction. Either everything is persisted, or
    /// nothing is. The created order has `Pending` status and no external reference.
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, ShopDatabaseError>;

    async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, ShopDatabaseError>;

    async fn fetch_order_items(&self, id: OrderId) -> Result<Vec<OrderItem>, ShopDatabaseError>;

    /// Applies a payment-driven status transition with the idempotency guard and, optionally, the stock adjustment
    /// in the same database transaction.
    ///
    /// The transition is a single conditional update: it only lands if the order's current status does not already
    /// signal a received payment (`Processing`, `Shipped`, `Delivered`). Two concurrent deliveries of the same
    /// notification therefore cannot both settle the order. The external reference is set to `payment_id` if, and
    /// only if, the order does not carry one yet; it is never overwritten with a different payment id.
    ///
    /// When `adjust_stock` is given and the update lands, every line item's stock delta is applied inside the same
    /// transaction, so a settled order can never be observed without its stock adjustment.
    async fn settle_order(
        &self,
        id: OrderId,
        status: OrderStatus,
        payment_id: &str,
        adjust_stock: Option<StockDirection>,
    ) -> Result<SettleOrderResult, ShopDatabaseError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), ShopDatabaseError> {
        Ok(())
    }
}

/// Stock mutation contract. Adjustments are always relative (`stock = stock + delta`) so that concurrent orders
/// touching the same product compose without locking.
#[allow(async_fn_in_trait)]
pub trait InventoryManagement: Clone {
    /// Applies a signed delta to a product's stock count. Returns `false` when the product no longer exists, which
    /// callers must treat as a no-op rather than a failure.
    async fn adjust_stock(&self, product_id: i64, delta: i64) -> Result<bool, ShopDatabaseError>;

    /// Applies the stock delta of every line item of the given order, in the given direction. Items whose product
    /// has been deleted are skipped. Returns the number of items whose adjustment was applied.
    async fn adjust_stock_for_order(
        &self,
        order_id: OrderId,
        direction: StockDirection,
    ) -> Result<usize, ShopDatabaseError>;
}

/// The result of a guarded settle attempt.
#[derive(Debug, Clone)]
pub enum SettleOrderResult {
    /// The conditional update landed; the order now has the new status.
    Settled(Order),
    /// The order already signals a received payment. No mutation happened.
    AlreadyPaid(Order),
    /// No order exists for this id.
    NotFound,
}

// A missing order is not an error at this seam: reads return `Option` and a settle reports it through
// `SettleOrderResult::NotFound`.
#[derive(Debug, Clone, Error)]
pub enum ShopDatabaseError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for ShopDatabaseError {
    fn from(e: sqlx::Error) -> Self {
        ShopDatabaseError::DatabaseError(e.to_string())
    }
}
