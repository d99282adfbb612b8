// Application state for HTTP handlers
use crate::application::aggregation_service::AggregationService;
use crate::application::metric_source::FilteredMetricSource;
use crate::application::query_service::MetricQueryService;
use crate::application::rollup_service::RollupService;
use crate::infrastructure::config::RollupSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub query_service: MetricQueryService,
    pub aggregation_service: AggregationService,
    pub rollup_service: RollupService,
}

impl AppState {
    pub fn new(source: Arc<dyn FilteredMetricSource>, rollup: RollupSettings) -> Self {
        Self {
            query_service: MetricQueryService::new(source.clone()),
            aggregation_service: AggregationService::new(source.clone()),
            rollup_service: RollupService::new(source, rollup),
        }
    }
}
