// Source trait for filtered metric access
use crate::domain::metric::{Metric, MetricId};
use crate::domain::query::{MetricFilter, SortSpec, Window};
use async_trait::async_trait;

/// Read access to the stored metric collection.
///
/// Implementations must order results by the requested sort key and break
/// ties on `id` ascending (see [`SortSpec::compare`]) so that pages stay
/// stable between calls. Futures returned here may be dropped at any await
/// point when a caller cancels.
#[async_trait]
pub trait FilteredMetricSource: Send + Sync {
    /// Count the records matching `filter` without materializing them
    async fn count(&self, filter: &MetricFilter) -> anyhow::Result<u64>;

    /// Fetch the records matching `filter`, optionally ordered and sliced
    async fn fetch(
        &self,
        filter: &MetricFilter,
        sort: Option<SortSpec>,
        window: Option<Window>,
    ) -> anyhow::Result<Vec<Metric>>;

    /// Look up a single record
    async fn find_by_id(&self, id: MetricId) -> anyhow::Result<Option<Metric>>;

    /// All distinct `type` values, ascending
    async fn distinct_types(&self) -> anyhow::Result<Vec<String>>;
}
