use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, NewOrderItem, Order, OrderId, OrderItem, OrderStatus},
    traits::ShopDatabaseError,
};

/// Inserts a new order row with `Pending` status using the given connection. This does not insert the line items;
/// embed this call and [`insert_order_items`] inside a transaction and pass `&mut *tx` as the connection argument
/// to get the atomic insert the checkout flow requires.
pub async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<Order, ShopDatabaseError> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (user_id, total, status) VALUES ($1, $2, 'Pending')
            RETURNING *;
        "#,
    )
    .bind(order.user_id)
    .bind(order.total)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Order {} inserted", order.id);
    Ok(order)
}

pub async fn insert_order_items(
    order_id: OrderId,
    items: &[NewOrderItem],
    conn: &mut SqliteConnection,
) -> Result<(), ShopDatabaseError> {
    for item in items {
        sqlx::query(
            r#"
                INSERT INTO order_items (order_id, product_id, product_name, price, quantity)
                VALUES ($1, $2, $3, $4, $5);
            "#,
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.product_name.as_str())
        .bind(item.price)
        .bind(item.quantity)
        .execute(&mut *conn)
        .await?;
    }
    debug!("📝️ {} line items inserted for order {order_id}", items.len());
    Ok(())
}

pub async fn fetch_order_by_id(id: OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(order)
}

/// Returns the line items for the given order, in insertion order.
pub async fn fetch_order_items(id: OrderId, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC")
        .bind(id)
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// The guarded, payment-driven status transition.
///
/// A single conditional update performs both the idempotency check and the write: the row only changes if its
/// current status does not already signal a received payment. `external_reference` is set via `COALESCE`, so the
/// first payment id wins and is never overwritten by a different one.
///
/// Returns the updated order, or `None` if the guard blocked the write (already paid) or no such order exists.
pub async fn settle_order(
    id: OrderId,
    status: OrderStatus,
    payment_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, ShopDatabaseError> {
    let result: Option<Order> = sqlx::query_as(
        r#"
            UPDATE orders
            SET status = $1,
                external_reference = COALESCE(external_reference, $2),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $3 AND status NOT IN ('Processing', 'Shipped', 'Delivered')
            RETURNING *;
        "#,
    )
    .bind(status.to_string())
    .bind(payment_id)
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(result)
}
