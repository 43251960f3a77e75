use chrono::{DateTime, Utc};
use serde::Serialize;

/// An analyst prediction joined with the text of the message it came from.
///
/// `id` is the storage key and never leaves the service; responses are
/// rendered through [`PredictionView`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub id: i64,
    pub stock_id: i64,
    pub prediction_type: Option<String>,
    pub target_price: Option<f64>,
    pub target_change_percent: Option<f64>,
    pub period: Option<String>,
    pub recommendation: Option<String>,
    pub direction: Option<String>,
    pub justification_text: Option<String>,
    pub message_text: Option<String>,
    pub predicted_at: DateTime<Utc>,
}

/// Response shape for a prediction.
///
/// `MessageID` and `ID` both carry the 1-based position of the entry within
/// this response only. They are renumbered on every request and must not be
/// used to look a prediction up again.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PredictionView {
    #[serde(rename = "ID")]
    pub display_index: usize,
    #[serde(rename = "MessageID")]
    pub message_id: usize,
    #[serde(rename = "StockID")]
    pub stock_id: i64,
    pub prediction_type: Option<String>,
    pub target_price: Option<f64>,
    pub target_change_percent: Option<f64>,
    pub period: Option<String>,
    pub recommendation: Option<String>,
    pub direction: Option<String>,
    pub justification_text: Option<String>,
    #[serde(rename = "Message")]
    pub message_text: Option<String>,
    /// Unix seconds, UTC.
    pub predicted_at: i64,
}

impl PredictionView {
    pub fn new(display_index: usize, prediction: Prediction) -> Self {
        Self {
            display_index,
            message_id: display_index,
            stock_id: prediction.stock_id,
            prediction_type: prediction.prediction_type,
            target_price: prediction.target_price,
            target_change_percent: prediction.target_change_percent,
            period: prediction.period,
            recommendation: prediction.recommendation,
            direction: prediction.direction,
            justification_text: prediction.justification_text,
            message_text: prediction.message_text,
            predicted_at: prediction.predicted_at.timestamp(),
        }
    }

    /// Numbers an already ordered sequence 1..N.
    pub fn number(predictions: Vec<Prediction>) -> Vec<Self> {
        predictions
            .into_iter()
            .enumerate()
            .map(|(i, p)| Self::new(i + 1, p))
            .collect()
    }
}
