use tracing::error;

use crate::errors::AppError;
use crate::store::StockStore;

/// Maps a ticker to its stock id. The match is exact: no trimming, no case folding.
pub async fn resolve(store: &dyn StockStore, ticker: &str) -> Result<i64, AppError> {
    store
        .find_stock_id(ticker)
        .await
        .map_err(|e| {
            error!("Failed to look up stock id for ticker {}: {}", ticker, e);
            AppError::source_unavailable(format!("error getting stock ID for ticker {}", ticker), e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("stock not found for ticker {}", ticker)))
}
