use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{Prediction, PricePoint, Stock};
use crate::services::{history_normalizer, history_parser, prediction_service, resolver};
use crate::store::StockStore;

/// Entry point for the read endpoints.
///
/// Holds the store handle and the history directory it was built with and
/// nothing else, so one instance is shared by all requests.
pub struct AggregationService {
    store: Arc<dyn StockStore>,
    data_dir: PathBuf,
}

impl AggregationService {
    pub fn new(store: Arc<dyn StockStore>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub async fn list_stocks(&self) -> Result<Vec<Stock>, AppError> {
        self.store.fetch_stocks().await.map_err(|e| {
            error!("Failed to fetch stocks: {}", e);
            AppError::source_unavailable("error querying stocks", e)
        })
    }

    pub async fn get_predictions(&self, ticker: &str) -> Result<Vec<Prediction>, AppError> {
        let stock_id = resolver::resolve(self.store.as_ref(), ticker).await?;
        prediction_service::list_predictions(self.store.as_ref(), ticker, stock_id).await
    }

    pub async fn get_history(&self, ticker: &str) -> Result<Vec<PricePoint>, AppError> {
        let stock_id = resolver::resolve(self.store.as_ref(), ticker).await?;
        let parsed = history_parser::parse(&self.data_dir, ticker).await?;
        info!(
            "Parsed {} bars for {} ({} rows dropped)",
            parsed.bars.len(),
            ticker,
            parsed.stats.dropped()
        );
        Ok(history_normalizer::normalize(stock_id, parsed.bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use chrono::{TimeZone, Utc};
    use tempfile::{tempdir, TempDir};

    fn prediction(id: i64, stock_id: i64, secs: i64) -> Prediction {
        Prediction {
            id,
            stock_id,
            prediction_type: Some("target".to_string()),
            target_price: Some(100.0 + id as f64),
            target_change_percent: None,
            period: None,
            recommendation: None,
            direction: None,
            justification_text: None,
            message_text: Some(format!("message {}", id)),
            predicted_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    fn service(store: InMemoryStore) -> (AggregationService, TempDir) {
        let dir = tempdir().unwrap();
        (AggregationService::new(Arc::new(store), dir.path()), dir)
    }

    fn seeded() -> InMemoryStore {
        InMemoryStore::new()
            .with_stock(1, "AAA", "Alpha")
            .with_stock(2, "BBB", "Beta")
            .with_prediction(prediction(31, 1, 1_000))
            .with_prediction(prediction(17, 1, 3_000))
            .with_prediction(prediction(52, 1, 2_000))
            .with_prediction(prediction(8, 2, 5_000))
    }

    #[tokio::test]
    async fn test_list_stocks_is_repeatable() {
        let (svc, _dir) = service(seeded());
        let first = svc.list_stocks().await.unwrap();
        let second = svc.list_stocks().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_stocks_empty_is_ok() {
        let (svc, _dir) = service(InMemoryStore::new());
        assert!(svc.list_stocks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_predictions_for_known_ticker() {
        let (svc, _dir) = service(seeded());
        let predictions = svc.get_predictions("AAA").await.unwrap();

        let ids: Vec<i64> = predictions.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![17, 52, 31]);
        assert!(predictions.iter().all(|p| p.stock_id == 1));
    }

    #[tokio::test]
    async fn test_get_predictions_unknown_ticker() {
        let (svc, _dir) = service(seeded());
        let err = svc.get_predictions("ZZZ").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = seeded();
        store.fail();
        let (svc, _dir) = service(store);
        assert!(matches!(svc.list_stocks().await, Err(AppError::SourceUnavailable { .. })));
        assert!(matches!(svc.get_predictions("AAA").await, Err(AppError::SourceUnavailable { .. })));
        assert!(matches!(svc.get_history("AAA").await, Err(AppError::SourceUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_get_history_sorted_and_filtered() {
        let (svc, dir) = service(seeded());
        std::fs::write(
            dir.path().join("AAA_D1.csv"),
            "\
Time,Open,High,Low,Close,TickVolume,Spread,RealVolume
2025.09.17 00:00:00,1,1,1,125.00,1,1,3000
2025.09.15 00:00:00,1,1,1,123.45,1,1,1000
2025.09.16 00:00:00,1,1,1
2025.09.16 00:00:00,1,1,1,x,1,1,2000
2025.09.16 00:00:00,1,1,1,124.10,1,1,-
",
        )
        .unwrap();

        let history = svc.get_history("AAA").await.unwrap();

        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(history.iter().all(|p| p.stock_id == 1));

        let first = serde_json::to_value(&history[0]).unwrap();
        assert_eq!(first["Timestamp"], "2025-09-15T00:00:00Z");
        assert_eq!(first["Price"], 123.45);
        assert_eq!(first["Volume"], 1000);
        assert_eq!(history[1].price, 124.10);
        assert_eq!(history[1].volume, 0);
    }

    #[tokio::test]
    async fn test_get_history_unknown_ticker_and_missing_file() {
        let (svc, _dir) = service(seeded());

        let unknown = svc.get_history("UNKNOWN").await.unwrap_err();
        assert!(unknown.is_not_found());
        assert_eq!(unknown.to_string(), "stock not found for ticker UNKNOWN");

        let no_file = svc.get_history("BBB").await.unwrap_err();
        assert!(no_file.is_not_found());
        assert_eq!(no_file.to_string(), "price history file not found for ticker BBB");
    }

    #[tokio::test]
    async fn test_get_history_empty_file() {
        let (svc, dir) = service(seeded());
        std::fs::write(dir.path().join("BBB_D1.csv"), "").unwrap();
        assert!(svc.get_history("BBB").await.unwrap().is_empty());
    }
}
