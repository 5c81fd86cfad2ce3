//! `SqliteDatabase` is a concrete implementation of a Moda Bella engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the persistence traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::db::{db_url, new_pool, orders, products};
use crate::{
    db_types::{NewOrder, Order, OrderId, OrderItem, OrderStatus, StockDirection},
    traits::{InventoryManagement, SettleOrderResult, ShopDatabase, ShopDatabaseError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl ShopDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Takes a new order and, in a single atomic transaction, stores the order row and all of its line items.
    /// Partial completion (order row present, items missing) cannot be observed.
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, ShopDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let created = orders::insert_order(order, &mut tx).await?;
        orders::insert_order_items(created.id, &order.items, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Order {} saved with {} line items", created.id, order.items.len());
        Ok(created)
    }

    async fn fetch_order(&self, id: OrderId) -> Result<Option<Order>, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_id(id, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_items(&self, id: OrderId) -> Result<Vec<OrderItem>, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let items = orders::fetch_order_items(id, &mut conn).await?;
        Ok(items)
    }

    async fn settle_order(
        &self,
        id: OrderId,
        status: OrderStatus,
        payment_id: &str,
        adjust_stock: Option<StockDirection>,
    ) -> Result<SettleOrderResult, ShopDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let settled = orders::settle_order(id, status, payment_id, &mut tx).await?;
        let order = match settled {
            Some(order) => order,
            // The conditional update did not land. Look at the row to tell "already paid" from "no such order".
            None => {
                let result = match orders::fetch_order_by_id(id, &mut tx).await? {
                    Some(order) => {
                        debug!("🗃️ Order {id} is already {}; settle request skipped", order.status);
                        SettleOrderResult::AlreadyPaid(order)
                    },
                    None => SettleOrderResult::NotFound,
                };
                tx.commit().await?;
                return Ok(result);
            },
        };
        if let Some(direction) = adjust_stock {
            let items = orders::fetch_order_items(id, &mut tx).await?;
            for item in &items {
                let Some(product_id) = item.product_id else {
                    debug!("🗃️ Order {id}: line item #{} has no product on record, skipping stock adjustment", item.id);
                    continue;
                };
                let rows = products::adjust_stock(product_id, direction.delta(item.quantity), &mut tx).await?;
                if rows == 0 {
                    warn!("🗃️ Order {id}: product #{product_id} no longer exists, stock adjustment skipped");
                }
            }
        }
        tx.commit().await?;
        debug!("🗃️ Order {id} settled as {}", order.status);
        Ok(SettleOrderResult::Settled(order))
    }

    async fn close(&mut self) -> Result<(), ShopDatabaseError> {
        self.pool.close().await;
        Ok(())
    }
}

impl InventoryManagement for SqliteDatabase {
    async fn adjust_stock(&self, product_id: i64, delta: i64) -> Result<bool, ShopDatabaseError> {
        let mut conn = self.pool.acquire().await?;
        let rows = products::adjust_stock(product_id, delta, &mut conn).await?;
        Ok(rows > 0)
    }

    async fn adjust_stock_for_order(
        &self,
        order_id: OrderId,
        direction: StockDirection,
    ) -> Result<usize, ShopDatabaseError> {
        let mut tx = self.pool.begin().await?;
        let items = orders::fetch_order_items(order_id, &mut tx).await?;
        let mut applied = 0;
        for item in &items {
            let Some(product_id) = item.product_id else {
                continue;
            };
            let rows = products::adjust_stock(product_id, direction.delta(item.quantity), &mut tx).await?;
            if rows > 0 {
                applied += 1;
            } else {
                warn!("🗃️ Order {order_id}: product #{product_id} no longer exists, stock adjustment skipped");
            }
        }
        tx.commit().await?;
        Ok(applied)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
