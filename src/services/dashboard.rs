use chrono::{NaiveTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::Result;

/// Medications with stock below this count as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_medications: i64,
    pub total_customers: i64,
    pub total_orders: i64,
    pub low_stock_count: i64,
    /// Orders created since today's UTC midnight. The upstream system names
    /// this a 7-day window but counts same-day orders only; the literal
    /// behavior is reproduced here.
    pub recent_orders: i64,
}

#[derive(Clone)]
pub struct DashboardService {
    db: SqlitePool,
}

impl DashboardService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let total_medications: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medications")
            .fetch_one(&self.db)
            .await?;
        let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.db)
            .await?;
        let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.db)
            .await?;

        let low_stock_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM medications WHERE stock < ?")
                .bind(LOW_STOCK_THRESHOLD)
                .fetch_one(&self.db)
                .await?;

        let midnight = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let recent_orders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE created_at >= ?")
                .bind(midnight)
                .fetch_one(&self.db)
                .await?;

        Ok(DashboardStats {
            total_medications,
            total_customers,
            total_orders,
            low_stock_count,
            recent_orders,
        })
    }
}
