use axum::extract::{Path, State};
use axum::{Json, Router};
use axum::routing::get;
use tracing::{info, error, warn};

use crate::errors::AppError;
use crate::models::PredictionView;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:ticker", get(get_predictions))
}

/// Predictions are renumbered 1..N here, after ordering, so storage ids
/// never reach the response.
pub async fn get_predictions(
    Path(ticker): Path<String>,
    State(state): State<AppState>
) -> Result<Json<Vec<PredictionView>>, AppError> {
    info!("GET /predictions/{} - Getting predictions", ticker);
    let predictions = state.aggregation.get_predictions(&ticker).await
        .map_err(|e| {
            if e.is_not_found() {
                warn!("No predictions for {}: {}", ticker, e);
            } else {
                error!("Failed to get predictions for {}: {}", ticker, e);
            }
            e
        })?;
    info!("Found {} predictions for {}", predictions.len(), ticker);
    Ok(Json(PredictionView::number(predictions)))
}
