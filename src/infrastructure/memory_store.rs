// In-memory metric store
use crate::application::metric_source::FilteredMetricSource;
use crate::domain::metric::{Metric, MetricId};
use crate::domain::query::{MetricFilter, SortSpec, Window};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

/// Id-keyed metric collection held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryMetricStore {
    metrics: RwLock<BTreeMap<MetricId, Metric>>,
}

impl InMemoryMetricStore {
    pub fn new(records: Vec<Metric>) -> Result<Self> {
        let mut metrics = BTreeMap::new();
        for metric in records {
            let id = metric.id;
            if metrics.insert(id, metric).is_some() {
                anyhow::bail!("Duplicate metric id {}", id);
            }
        }

        Ok(Self {
            metrics: RwLock::new(metrics),
        })
    }

    pub async fn len(&self) -> usize {
        self.metrics.read().await.len()
    }
}

#[async_trait]
impl FilteredMetricSource for InMemoryMetricStore {
    async fn count(&self, filter: &MetricFilter) -> Result<u64> {
        let metrics = self.metrics.read().await;
        Ok(metrics.values().filter(|m| filter.matches(m)).count() as u64)
    }

    async fn fetch(
        &self,
        filter: &MetricFilter,
        sort: Option<SortSpec>,
        window: Option<Window>,
    ) -> Result<Vec<Metric>> {
        let metrics = self.metrics.read().await;
        // Map iteration is already id ascending, which the stable sort keeps for ties
        let mut matching: Vec<&Metric> = metrics.values().filter(|m| filter.matches(m)).collect();

        if let Some(sort) = sort {
            matching.sort_by(|a, b| sort.compare(a, b));
        }

        let (offset, limit) = match window {
            Some(w) => (
                usize::try_from(w.offset).unwrap_or(usize::MAX),
                usize::try_from(w.limit).unwrap_or(usize::MAX),
            ),
            None => (0, usize::MAX),
        };

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: MetricId) -> Result<Option<Metric>> {
        Ok(self.metrics.read().await.get(&id).cloned())
    }

    async fn distinct_types(&self) -> Result<Vec<String>> {
        let metrics = self.metrics.read().await;
        let types: BTreeSet<&str> = metrics.values().map(|m| m.metric_type.as_str()).collect();
        Ok(types.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{SortField, SortOrder};
    use crate::test_utils::metric_at;

    fn store() -> InMemoryMetricStore {
        InMemoryMetricStore::new(vec![
            metric_at(3, "motion", "hall", "2024-01-02T10:00:00Z", None),
            metric_at(1, "energy", "kitchen", "2024-01-01T10:00:00Z", None),
            metric_at(2, "motion", "kitchen", "2024-01-03T10:00:00Z", None),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_rejects_duplicate_ids() {
        let result = InMemoryMetricStore::new(vec![
            metric_at(1, "motion", "hall", "2024-01-01T00:00:00Z", None),
            metric_at(1, "energy", "hall", "2024-01-01T00:00:00Z", None),
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_count_and_fetch_share_the_filter() {
        let store = store();
        let filter = MetricFilter {
            metric_type: Some("motion".to_string()),
            ..Default::default()
        };

        assert_eq!(store.count(&filter).await.unwrap(), 2);
        let ids: Vec<i64> = store
            .fetch(&filter, None, None)
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_sorts_and_slices() {
        let store = store();
        let sort = SortSpec::new(SortField::CreatedAt, SortOrder::Asc);
        let window = Window { offset: 1, limit: 5 };

        let ids: Vec<i64> = store
            .fetch(&MetricFilter::default(), Some(sort), Some(window))
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn test_find_and_distinct_types() {
        let store = store();
        assert_eq!(store.len().await, 3);
        assert_eq!(store.find_by_id(2).await.unwrap().unwrap().name, "kitchen");
        assert!(store.find_by_id(99).await.unwrap().is_none());
        assert_eq!(store.distinct_types().await.unwrap(), vec!["energy", "motion"]);
    }
}
