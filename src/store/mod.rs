use async_trait::async_trait;

use crate::models::{Prediction, Stock};

mod postgres;
#[cfg(test)]
pub mod memory;

pub use postgres::PgStockStore;

/// Read access to the relational store.
///
/// Implementations must tolerate concurrent calls from many in-flight
/// requests without external locking.
#[async_trait]
pub trait StockStore: Send + Sync {
    async fn fetch_stocks(&self) -> Result<Vec<Stock>, sqlx::Error>;

    /// `None` when no stock has exactly this ticker.
    async fn find_stock_id(&self, ticker: &str) -> Result<Option<i64>, sqlx::Error>;

    /// Predictions for the stock, newest first, joined with message text.
    async fn fetch_predictions(&self, stock_id: i64) -> Result<Vec<Prediction>, sqlx::Error>;
}
