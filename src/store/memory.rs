use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::models::{Prediction, Stock};
use super::StockStore;

/// Test double for [`StockStore`]. Predictions are returned in insertion
/// order, so tests can feed deliberately unordered rows.
#[derive(Default)]
pub struct InMemoryStore {
    stocks: Vec<Stock>,
    predictions: Vec<Prediction>,
    failing: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(mut self, id: i64, ticker: &str, name: &str) -> Self {
        self.stocks.push(Stock {
            id,
            ticker: ticker.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn with_prediction(mut self, prediction: Prediction) -> Self {
        self.predictions.push(prediction);
        self
    }

    /// Makes every subsequent call fail as if the pool were exhausted.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl StockStore for InMemoryStore {
    async fn fetch_stocks(&self) -> Result<Vec<Stock>, sqlx::Error> {
        self.check()?;
        Ok(self.stocks.clone())
    }

    async fn find_stock_id(&self, ticker: &str) -> Result<Option<i64>, sqlx::Error> {
        self.check()?;
        Ok(self.stocks.iter().find(|s| s.ticker == ticker).map(|s| s.id))
    }

    async fn fetch_predictions(&self, stock_id: i64) -> Result<Vec<Prediction>, sqlx::Error> {
        self.check()?;
        Ok(self
            .predictions
            .iter()
            .filter(|p| p.stock_id == stock_id)
            .cloned()
            .collect())
    }
}
