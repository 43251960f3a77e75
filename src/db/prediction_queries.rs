use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::Prediction;

#[derive(Debug, FromRow)]
struct PredictionRow {
    id: i64,
    stock_id: i64,
    prediction_type: Option<String>,
    target_price: Option<f64>,
    target_change_percent: Option<f64>,
    period: Option<String>,
    recommendation: Option<String>,
    direction: Option<String>,
    justification_text: Option<String>,
    message_text: Option<String>,
    predicted_at_epoch: i64,
}

impl PredictionRow {
    fn into_prediction(self) -> Result<Prediction, sqlx::Error> {
        let predicted_at = DateTime::<Utc>::from_timestamp(self.predicted_at_epoch, 0)
            .ok_or_else(|| {
                sqlx::Error::Decode(
                    format!(
                        "predicted_at out of range for prediction {}: {}",
                        self.id, self.predicted_at_epoch
                    )
                    .into(),
                )
            })?;

        Ok(Prediction {
            id: self.id,
            stock_id: self.stock_id,
            prediction_type: self.prediction_type,
            target_price: self.target_price,
            target_change_percent: self.target_change_percent,
            period: self.period,
            recommendation: self.recommendation,
            direction: self.direction,
            justification_text: self.justification_text,
            message_text: self.message_text,
            predicted_at,
        })
    }
}

/// All predictions for a stock, newest first, with the source message text.
///
/// The message join is a LEFT JOIN so a prediction whose message row is
/// missing is still returned with `message_text = None`.
pub async fn fetch_for_stock(
    pool: &PgPool,
    stock_id: i64,
) -> Result<Vec<Prediction>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PredictionRow>(
        r#"
        SELECT
            p.id::BIGINT AS id,
            p.stock_id::BIGINT AS stock_id,
            p.prediction_type,
            p.target_price::FLOAT8 AS target_price,
            p.target_change_percent::FLOAT8 AS target_change_percent,
            p.period,
            p.recommendation,
            p.direction,
            p.justification_text,
            m.text AS message_text,
            FLOOR(EXTRACT(EPOCH FROM p.predicted_at))::BIGINT AS predicted_at_epoch
        FROM predictions p
        LEFT JOIN messages m ON p.message_id = m.telegram_id
        WHERE p.stock_id = $1
        ORDER BY p.predicted_at DESC, p.id ASC
        "#,
    )
    .bind(stock_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(PredictionRow::into_prediction).collect()
}
