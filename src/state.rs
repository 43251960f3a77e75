use std::sync::Arc;
use crate::services::AggregationService;

#[derive(Clone)]
pub struct AppState {
    pub aggregation: Arc<AggregationService>,
}
