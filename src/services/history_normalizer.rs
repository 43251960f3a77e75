use chrono::{TimeZone, Utc};

use crate::models::PricePoint;
use super::history_parser::RawBar;

/// Turns parsed bars into UTC price points, oldest first.
///
/// File timestamps carry no zone and are read as UTC. The sort is stable,
/// so bars sharing a timestamp keep their file order and none are merged.
pub fn normalize(stock_id: i64, bars: Vec<RawBar>) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = bars
        .into_iter()
        .map(|bar| PricePoint {
            stock_id,
            timestamp: Utc.from_utc_datetime(&bar.timestamp),
            price: bar.close,
            volume: bar.volume,
        })
        .collect();

    points.sort_by_key(|p| p.timestamp);
    points
}
