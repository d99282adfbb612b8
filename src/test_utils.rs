// Test fixtures - Metric builders and stub sources

use crate::application::metric_source::FilteredMetricSource;
use crate::domain::metric::{Metric, MetricId};
use crate::domain::query::{MetricFilter, SortSpec, Window};
use crate::infrastructure::memory_store::InMemoryMetricStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Build a metric from an RFC 3339 timestamp
pub fn metric_at(
    id: MetricId,
    metric_type: &str,
    name: &str,
    created_at: &str,
    payload: Option<&str>,
) -> Metric {
    Metric::new(
        id,
        metric_type,
        name,
        payload.map(str::to_string),
        parse_utc(created_at),
    )
}

pub fn parse_utc(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .expect("valid RFC 3339 timestamp")
        .with_timezone(&Utc)
}

pub fn memory_source(records: Vec<Metric>) -> Arc<dyn FilteredMetricSource> {
    Arc::new(InMemoryMetricStore::new(records).expect("unique ids"))
}

/// Source whose every call fails, as an unreachable backend would
pub struct FailingSource;

#[async_trait]
impl FilteredMetricSource for FailingSource {
    async fn count(&self, _filter: &MetricFilter) -> anyhow::Result<u64> {
        anyhow::bail!("metric store unreachable")
    }

    async fn fetch(
        &self,
        _filter: &MetricFilter,
        _sort: Option<SortSpec>,
        _window: Option<Window>,
    ) -> anyhow::Result<Vec<Metric>> {
        anyhow::bail!("metric store unreachable")
    }

    async fn find_by_id(&self, _id: MetricId) -> anyhow::Result<Option<Metric>> {
        anyhow::bail!("metric store unreachable")
    }

    async fn distinct_types(&self) -> anyhow::Result<Vec<String>> {
        anyhow::bail!("metric store unreachable")
    }
}

/// Source that never answers, for exercising cancellation
pub struct StalledSource;

#[async_trait]
impl FilteredMetricSource for StalledSource {
    async fn count(&self, _filter: &MetricFilter) -> anyhow::Result<u64> {
        std::future::pending().await
    }

    async fn fetch(
        &self,
        _filter: &MetricFilter,
        _sort: Option<SortSpec>,
        _window: Option<Window>,
    ) -> anyhow::Result<Vec<Metric>> {
        std::future::pending().await
    }

    async fn find_by_id(&self, _id: MetricId) -> anyhow::Result<Option<Metric>> {
        std::future::pending().await
    }

    async fn distinct_types(&self) -> anyhow::Result<Vec<String>> {
        std::future::pending().await
    }
}
