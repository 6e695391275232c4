use chrono::Utc;
use sqlx::{Connection, SqliteConnection, SqlitePool};
use tracing::{info, warn};

use crate::error::{ApiError, Result};
use crate::models::{OrderDetails, OrderItemRecord, OrderLineRequest, OrderRecord};

/// Order creation, hydration and deletion.
///
/// Creation runs inside a single immediate transaction: the write lock is
/// taken before the stock reads, so concurrent orders queue on SQLite's busy
/// handler instead of failing mid-upgrade, and every line is validated
/// against current stock before any stock decrement or item insert happens.
/// A failing line leaves no partial writes behind, and the stock decrement
/// is additionally guarded with `stock >= quantity`, so two orders competing
/// for the last units cannot both succeed.
#[derive(Clone)]
pub struct OrderService {
    db: SqlitePool,
}

/// A validated order line, resolved against the medication table.
#[derive(Debug)]
struct ResolvedLine {
    medication_id: i64,
    medication_name: String,
    quantity: i64,
    unit_price: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct MedicationRef {
    id: i64,
    name: String,
    stock: i64,
    price: f64,
}

impl OrderService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create an order for `customer_id` from the requested lines.
    ///
    /// Lines referencing an unknown medication are skipped, matching the
    /// upstream behavior. Any line exceeding available stock aborts the whole
    /// order with no writes surviving.
    pub async fn create_order(
        &self,
        customer_id: i64,
        lines: &[OrderLineRequest],
    ) -> Result<OrderDetails> {
        let customer_exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE id = ?")
                .bind(customer_id)
                .fetch_one(&self.db)
                .await?;
        if customer_exists == 0 {
            return Err(ApiError::not_found("Customer"));
        }

        // Take the write lock before the stock reads. A deferred transaction
        // would start as a reader and hit SQLITE_BUSY when it tries to
        // upgrade while another writer holds the lock.
        let mut conn = self.db.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        match Self::apply_order(&mut conn, customer_id, lines).await {
            Ok((order_id, total_amount, line_count)) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                drop(conn);

                info!(
                    order_id,
                    customer_id,
                    total_amount,
                    lines = line_count,
                    "Order created"
                );

                self.get_order(order_id).await
            }
            Err(err) => {
                if sqlx::query("ROLLBACK").execute(&mut *conn).await.is_err() {
                    // A connection with a broken transaction must not go
                    // back into the pool.
                    let _ = conn.detach().close().await;
                }
                Err(err)
            }
        }
    }

    /// Resolve, validate and persist the order inside the caller's open
    /// transaction. Returns the order id, its total and the surviving line
    /// count.
    async fn apply_order(
        conn: &mut SqliteConnection,
        customer_id: i64,
        lines: &[OrderLineRequest],
    ) -> Result<(i64, f64, usize)> {
        // Phase one: resolve and validate every line before touching stock.
        let mut resolved: Vec<ResolvedLine> = Vec::with_capacity(lines.len());
        for line in lines {
            let quantity = line.quantity.unwrap_or(1);
            if quantity < 1 {
                return Err(ApiError::validation("quantity must be at least 1"));
            }

            let medication = match line.medication_id {
                Some(id) => {
                    sqlx::query_as::<_, MedicationRef>(
                        "SELECT id, name, stock, price FROM medications WHERE id = ?",
                    )
                    .bind(id)
                    .fetch_optional(&mut *conn)
                    .await?
                }
                None => None,
            };

            let Some(medication) = medication else {
                warn!(
                    medication_id = ?line.medication_id,
                    "Skipping order line for unknown medication"
                );
                continue;
            };

            if medication.stock < quantity {
                return Err(ApiError::insufficient_stock(medication.name));
            }

            resolved.push(ResolvedLine {
                medication_id: medication.id,
                medication_name: medication.name,
                quantity,
                unit_price: medication.price,
            });
        }

        // Phase two: persist the order, the stock decrements and the items.
        let created_at = Utc::now();
        let order_id = sqlx::query(
            "INSERT INTO orders (customer_id, total_amount, status, created_at)
             VALUES (?, 0, 'pending', ?)",
        )
        .bind(customer_id)
        .bind(created_at)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        let mut total_amount = 0.0;
        for line in &resolved {
            let updated = sqlx::query(
                "UPDATE medications SET stock = stock - ? WHERE id = ? AND stock >= ?",
            )
            .bind(line.quantity)
            .bind(line.medication_id)
            .bind(line.quantity)
            .execute(&mut *conn)
            .await?;

            // Guard against a concurrent order draining stock between the
            // validation read and this write.
            if updated.rows_affected() == 0 {
                return Err(ApiError::insufficient_stock(line.medication_name.clone()));
            }

            sqlx::query(
                "INSERT INTO order_items (order_id, medication_id, quantity, unit_price)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(line.medication_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *conn)
            .await?;

            total_amount += line.quantity as f64 * line.unit_price;
        }

        sqlx::query("UPDATE orders SET total_amount = ? WHERE id = ?")
            .bind(total_amount)
            .bind(order_id)
            .execute(&mut *conn)
            .await?;

        Ok((order_id, total_amount, resolved.len()))
    }

    /// Fetch one order with its customer name and hydrated items.
    pub async fn get_order(&self, order_id: i64) -> Result<OrderDetails> {
        let order = sqlx::query_as::<_, OrderRecord>(
            "SELECT o.id, o.customer_id, c.name AS customer_name,
                    o.total_amount, o.status, o.created_at
             FROM orders o
             JOIN customers c ON c.id = o.customer_id
             WHERE o.id = ?",
        )
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| ApiError::not_found("Order"))?;

        let items = self.get_items(order_id).await?;

        Ok(OrderDetails { order, items })
    }

    /// List all orders, hydrated.
    pub async fn list_orders(&self) -> Result<Vec<OrderDetails>> {
        let orders = sqlx::query_as::<_, OrderRecord>(
            "SELECT o.id, o.customer_id, c.name AS customer_name,
                    o.total_amount, o.status, o.created_at
             FROM orders o
             JOIN customers c ON c.id = o.customer_id
             ORDER BY o.id",
        )
        .fetch_all(&self.db)
        .await?;

        let mut details = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.get_items(order.id).await?;
            details.push(OrderDetails { order, items });
        }

        Ok(details)
    }

    /// Update an order's status. Any status string is accepted; a missing
    /// status leaves the order unchanged.
    pub async fn update_status(&self, order_id: i64, status: Option<String>) -> Result<OrderDetails> {
        if let Some(status) = status {
            let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
                .bind(&status)
                .bind(order_id)
                .execute(&self.db)
                .await?;

            if result.rows_affected() == 0 {
                return Err(ApiError::not_found("Order"));
            }

            info!(order_id, status, "Order status updated");
        }

        self.get_order(order_id).await
    }

    /// Delete an order. Its items go with it via the cascading foreign key;
    /// medication stock is NOT restored.
    pub async fn delete_order(&self, order_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found("Order"));
        }

        info!(order_id, "Order deleted");
        Ok(())
    }

    async fn get_items(&self, order_id: i64) -> Result<Vec<OrderItemRecord>> {
        let items = sqlx::query_as::<_, OrderItemRecord>(
            "SELECT i.id, i.order_id, i.medication_id, m.name AS medication_name,
                    i.quantity, i.unit_price, i.quantity * i.unit_price AS total_price
             FROM order_items i
             JOIN medications m ON m.id = i.medication_id
             WHERE i.order_id = ?
             ORDER BY i.id",
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items)
    }
}
