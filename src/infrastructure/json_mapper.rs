// Mapper to convert domain models to JSON wire types
use crate::domain::metric::Metric;
use crate::domain::report::{AggregationResult, DailyRollupBucket, PagedResult, TypeCount};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricJson {
    pub id: i64,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub name: String,
    pub payload: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedJson<T: Serialize> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCountJson {
    #[serde(rename = "type")]
    pub metric_type: String,
    pub count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationJson {
    pub total_count: u64,
    pub per_type: Vec<TypeCountJson>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucketJson {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub name: String,
    pub count: u64,
    pub average_values: BTreeMap<String, f64>,
}

pub fn metric_to_json(metric: Metric) -> MetricJson {
    let payload = metric.payload_object();
    MetricJson {
        id: metric.id,
        metric_type: metric.metric_type,
        name: metric.name,
        payload,
        created_at: metric.created_at,
    }
}

pub fn page_to_json(page: PagedResult<Metric>) -> PagedJson<MetricJson> {
    let page = page.map(metric_to_json);
    PagedJson {
        items: page.items,
        total_count: page.total_count,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
    }
}

pub fn aggregation_to_json(result: AggregationResult) -> AggregationJson {
    AggregationJson {
        total_count: result.total_count,
        per_type: result.per_type.into_iter().map(type_count_to_json).collect(),
    }
}

fn type_count_to_json(entry: TypeCount) -> TypeCountJson {
    TypeCountJson {
        metric_type: entry.metric_type,
        count: entry.count,
    }
}

pub fn bucket_to_json(bucket: DailyRollupBucket) -> DailyBucketJson {
    DailyBucketJson {
        date: bucket.date,
        metric_type: bucket.metric_type,
        name: bucket.name,
        count: bucket.count,
        average_values: bucket.average_values,
    }
}
