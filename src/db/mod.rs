pub mod stock_queries;
pub mod prediction_queries;
