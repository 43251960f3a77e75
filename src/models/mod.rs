mod stock;
mod prediction;
mod price_point;

pub use stock::Stock;
pub use prediction::{Prediction, PredictionView};
pub use price_point::PricePoint;
