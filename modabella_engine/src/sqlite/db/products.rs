use log::trace;
use sqlx::SqliteConnection;

use crate::traits::ShopDatabaseError;

/// Applies a signed, relative stock delta to a product. Relative updates commute, so concurrent adjustments from
/// unrelated orders never lose writes.
///
/// Returns the number of affected rows: 0 means the product no longer exists, which callers treat as a no-op.
pub async fn adjust_stock(
    product_id: i64,
    delta: i64,
    conn: &mut SqliteConnection,
) -> Result<u64, ShopDatabaseError> {
    let result = sqlx::query("UPDATE products SET stock = stock + $1 WHERE id = $2")
        .bind(delta)
        .bind(product_id)
        .execute(conn)
        .await?;
    trace!("📦️ Stock adjustment of {delta} applied to product #{product_id} ({} rows)", result.rows_affected());
    Ok(result.rows_affected())
}

pub async fn fetch_stock(product_id: i64, conn: &mut SqliteConnection) -> Result<Option<i64>, ShopDatabaseError> {
    let stock = sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(conn)
        .await?;
    Ok(stock)
}
