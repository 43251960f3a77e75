use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

// One close-price observation from a ticker's history file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PricePoint {
    #[serde(rename = "StockID")]
    pub stock_id: i64,
    #[serde(serialize_with = "serialize_instant")]
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub volume: u64,
}

fn serialize_instant<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Secs, true))
}
