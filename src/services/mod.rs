pub mod resolver;
pub mod prediction_service;
pub mod history_parser;
pub mod history_normalizer;
pub mod aggregation_service;

pub use aggregation_service::AggregationService;
