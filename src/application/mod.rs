// Application layer - Query use cases over the metric source
pub mod aggregation_service;
pub mod error;
pub mod metric_source;
pub mod payload_extractor;
pub mod query_service;
pub mod rollup_service;
