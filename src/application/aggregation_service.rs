// Aggregation service - Counts per metric type
use crate::application::error::{cancellable, QueryResult};
use crate::application::metric_source::FilteredMetricSource;
use crate::domain::query::MetricFilter;
use crate::domain::report::{AggregationResult, TypeCount};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AggregationService {
    source: Arc<dyn FilteredMetricSource>,
}

impl AggregationService {
    pub fn new(source: Arc<dyn FilteredMetricSource>) -> Self {
        Self { source }
    }

    /// Count the filtered records, overall and per type. Types are listed by
    /// count descending, equal counts by type name ascending.
    pub async fn aggregate(
        &self,
        filter: &MetricFilter,
        token: &CancellationToken,
    ) -> QueryResult<AggregationResult> {
        let fetch = async {
            futures::try_join!(
                self.source.count(filter),
                self.source.fetch(filter, None, None),
            )
        };
        let (total_count, metrics) = cancellable(token, fetch).await?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for metric in metrics {
            *counts.entry(metric.metric_type).or_default() += 1;
        }

        let mut per_type: Vec<TypeCount> = counts
            .into_iter()
            .map(|(metric_type, count)| TypeCount::new(metric_type, count))
            .collect();
        per_type.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.metric_type.cmp(&b.metric_type))
        });

        tracing::debug!(
            "Aggregated {} metrics into {} types",
            total_count,
            per_type.len()
        );

        Ok(AggregationResult {
            total_count,
            per_type,
        })
    }
}
