use async_trait::async_trait;
use sqlx::PgPool;

use crate::db;
use crate::models::{Prediction, Stock};
use super::StockStore;

#[derive(Clone)]
pub struct PgStockStore {
    pool: PgPool,
}

impl PgStockStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StockStore for PgStockStore {
    async fn fetch_stocks(&self) -> Result<Vec<Stock>, sqlx::Error> {
        db::stock_queries::fetch_all(&self.pool).await
    }

    async fn find_stock_id(&self, ticker: &str) -> Result<Option<i64>, sqlx::Error> {
        db::stock_queries::fetch_id_by_ticker(&self.pool, ticker).await
    }

    async fn fetch_predictions(&self, stock_id: i64) -> Result<Vec<Prediction>, sqlx::Error> {
        db::prediction_queries::fetch_for_stock(&self.pool, stock_id).await
    }
}
