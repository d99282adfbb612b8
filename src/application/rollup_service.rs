// Rollup service - Daily averages of numeric payload fields
use crate::application::error::{cancellable, QueryResult};
use crate::application::metric_source::FilteredMetricSource;
use crate::application::payload_extractor::extract_numerics;
use crate::domain::metric::Metric;
use crate::domain::query::MetricFilter;
use crate::domain::report::DailyRollupBucket;
use crate::infrastructure::config::RollupSettings;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Inclusive range of whole UTC days covered by one rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DayRange {
    /// Normalize both ends to their calendar day, then cut the range to
    /// at most `max_span_days` days after `from`.
    pub fn clamped(from: DateTime<Utc>, to: DateTime<Utc>, max_span_days: u32) -> Self {
        let first = from.date_naive();
        let requested_last = to.date_naive();
        let last = first
            .checked_add_days(Days::new(u64::from(max_span_days)))
            .map_or(requested_last, |limit| requested_last.min(limit));
        Self { first, last }
    }

    fn start(&self) -> DateTime<Utc> {
        self.first.and_time(NaiveTime::MIN).and_utc()
    }

    fn end(&self) -> DateTime<Utc> {
        self.last
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN).and_utc() - TimeDelta::nanoseconds(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

type BucketKey = (NaiveDate, String, String);

#[derive(Clone)]
pub struct RollupService {
    source: Arc<dyn FilteredMetricSource>,
    settings: RollupSettings,
}

impl RollupService {
    pub fn new(source: Arc<dyn FilteredMetricSource>, settings: RollupSettings) -> Self {
        Self { source, settings }
    }

    /// Group metrics by (day, type, name) and average the most frequent
    /// numeric payload fields of each group. Buckets come back ordered by
    /// day, type, then name.
    pub async fn daily_averages(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        metric_type: Option<&str>,
        name: Option<&str>,
        token: &CancellationToken,
    ) -> QueryResult<Vec<DailyRollupBucket>> {
        let range = DayRange::clamped(from, to, self.settings.max_span_days);
        if range.last < to.date_naive() {
            tracing::debug!(
                "Daily rollup range clamped to {} .. {} (requested until {})",
                range.first,
                range.last,
                to.date_naive()
            );
        }

        let filter = MetricFilter {
            metric_type: metric_type.map(str::to_string),
            name_contains: name.map(str::to_string),
            from: Some(range.start()),
            to: Some(range.end()),
        };
        let metrics = cancellable(token, self.source.fetch(&filter, None, None)).await?;
        let fetched = metrics.len();

        let buckets: Vec<DailyRollupBucket> = group_by_day(metrics)
            .into_iter()
            .map(|(key, members)| self.summarize(key, &members))
            .collect();

        tracing::debug!(
            "Daily rollup built {} buckets from {} metrics",
            buckets.len(),
            fetched
        );

        Ok(buckets)
    }

    fn summarize(&self, (date, metric_type, name): BucketKey, members: &[Metric]) -> DailyRollupBucket {
        let mut samples: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for metric in members {
            for (field, value) in extract_numerics(metric.payload.as_deref()) {
                samples.entry(field).or_default().push(value);
            }
        }

        // Stable sort keeps name order among fields with equal frequency
        let mut ranked: Vec<(String, Vec<f64>)> = samples.into_iter().collect();
        ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        let average_values = ranked
            .into_iter()
            .take(self.settings.top_fields)
            .map(|(field, values)| {
                let mean = values.iter().sum::<f64>() / values.len() as f64;
                (field, mean)
            })
            .collect();

        DailyRollupBucket {
            date,
            metric_type,
            name,
            count: members.len() as u64,
            average_values,
        }
    }
}

fn group_by_day(metrics: Vec<Metric>) -> BTreeMap<BucketKey, Vec<Metric>> {
    let mut buckets: BTreeMap<BucketKey, Vec<Metric>> = BTreeMap::new();
    for metric in metrics {
        let key = (
            metric.created_at.date_naive(),
            metric.metric_type.clone(),
            metric.name.clone(),
        );
        buckets.entry(key).or_default().push(metric);
    }
    buckets
}
