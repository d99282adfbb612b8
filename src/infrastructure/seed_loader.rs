// JSON Lines loader for the in-memory metric store
use crate::domain::metric::{Metric, MetricId};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecord {
    id: MetricId,
    #[serde(rename = "type")]
    metric_type: String,
    name: String,
    #[serde(default)]
    payload: Value,
    created_at: DateTime<Utc>,
}

impl From<SeedRecord> for Metric {
    fn from(record: SeedRecord) -> Self {
        // Raw strings are kept verbatim, even when they are not valid JSON
        let payload = match record.payload {
            Value::Null => None,
            Value::String(raw) => Some(raw),
            other => Some(other.to_string()),
        };
        Metric::new(record.id, record.metric_type, record.name, payload, record.created_at)
    }
}

pub async fn load_metrics(path: impl AsRef<Path>) -> Result<Vec<Metric>> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;

    let metrics = parse_metrics(&contents)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;
    tracing::info!("Loaded {} metrics from {}", metrics.len(), path.display());
    Ok(metrics)
}

pub fn parse_metrics(contents: &str) -> Result<Vec<Metric>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<SeedRecord>(line)
                .map(Metric::from)
                .with_context(|| format!("Invalid metric on line {}", index + 1))
        })
        .collect()
}
