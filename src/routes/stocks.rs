use axum::extract::{Path, State};
use axum::{Json, Router};
use axum::routing::get;
use tracing::{info, error, warn};

use crate::errors::AppError;
use crate::models::{PricePoint, Stock};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stocks))
        .route("/:ticker/history", get(get_history))
}

pub async fn list_stocks(
    State(state): State<AppState>
) -> Result<Json<Vec<Stock>>, AppError> {
    info!("GET /stocks - Listing stocks");
    let stocks = state.aggregation.list_stocks().await
        .map_err(|e| {
            error!("Failed to list stocks: {}", e);
            e
        })?;
    info!("Returning {} stocks", stocks.len());
    Ok(Json(stocks))
}

pub async fn get_history(
    Path(ticker): Path<String>,
    State(state): State<AppState>
) -> Result<Json<Vec<PricePoint>>, AppError> {
    info!("GET /stocks/{}/history - Getting price history", ticker);
    let history = state.aggregation.get_history(&ticker).await
        .map_err(|e| {
            if e.is_not_found() {
                warn!("No price history for {}: {}", ticker, e);
            } else {
                error!("Failed to get price history for {}: {}", ticker, e);
            }
            e
        })?;
    info!("Found {} price points for {}", history.len(), ticker);
    Ok(Json(history))
}
