use tracing::{debug, error};

use crate::errors::AppError;
use crate::models::Prediction;
use crate::store::StockStore;

/// Predictions for a resolved stock, newest first.
///
/// The store is expected to order rows already; the stable re-sort keeps
/// the newest-first guarantee for any store and preserves retrieval order
/// between equal timestamps.
pub async fn list_predictions(
    store: &dyn StockStore,
    ticker: &str,
    stock_id: i64,
) -> Result<Vec<Prediction>, AppError> {
    let mut predictions = store.fetch_predictions(stock_id).await.map_err(|e| {
        error!("Failed to fetch predictions for {} (stock {}): {}", ticker, stock_id, e);
        AppError::source_unavailable(
            format!("error querying predictions for ticker {} (stock {})", ticker, stock_id),
            e,
        )
    })?;

    predictions.sort_by(|a, b| b.predicted_at.cmp(&a.predicted_at));
    debug!("Fetched {} predictions for {}", predictions.len(), ticker);
    Ok(predictions)
}
