// Metric query service - Filtering, sorting and paging over the metric source
use crate::application::error::{cancellable, QueryResult};
use crate::application::metric_source::FilteredMetricSource;
use crate::domain::metric::{Metric, MetricId};
use crate::domain::query::{MetricFilter, MetricQuery, PageRequest, SortSpec};
use crate::domain::report::PagedResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct MetricQueryService {
    source: Arc<dyn FilteredMetricSource>,
}

impl MetricQueryService {
    pub fn new(source: Arc<dyn FilteredMetricSource>) -> Self {
        Self { source }
    }

    /// Return one page of the filtered, ordered collection. The total is
    /// counted over the whole filtered set, not the page.
    pub async fn query(
        &self,
        query: &MetricQuery,
        token: &CancellationToken,
    ) -> QueryResult<PagedResult<Metric>> {
        let window = query.page.window();
        let fetch = async {
            futures::try_join!(
                self.source.count(&query.filter),
                self.source.fetch(&query.filter, Some(query.sort), Some(window)),
            )
        };
        let (total_count, items) = cancellable(token, fetch).await?;

        tracing::debug!(
            "Metric query page {} (size {}) returned {} of {} records",
            query.page.page,
            query.page.page_size,
            items.len(),
            total_count
        );

        Ok(PagedResult {
            items,
            total_count,
            page: query.page.page,
            page_size: query.page.page_size,
            total_pages: query.page.total_pages(total_count),
        })
    }

    pub async fn get_by_id(
        &self,
        id: MetricId,
        token: &CancellationToken,
    ) -> QueryResult<Option<Metric>> {
        cancellable(token, self.source.find_by_id(id)).await
    }

    pub async fn list_distinct_types(&self, token: &CancellationToken) -> QueryResult<Vec<String>> {
        cancellable(token, self.source.distinct_types()).await
    }

    /// Page through one type using the default ordering
    pub async fn list_by_type(
        &self,
        metric_type: &str,
        page: PageRequest,
        token: &CancellationToken,
    ) -> QueryResult<PagedResult<Metric>> {
        let query = MetricQuery {
            filter: MetricFilter {
                metric_type: Some(metric_type.to_string()),
                ..Default::default()
            },
            sort: SortSpec::default(),
            page,
        };
        self.query(&query, token).await
    }
}
